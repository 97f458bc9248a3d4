use super::neuron::Activation;
use super::{Brain, BrainParams};
use crate::config::BrainConfig;
use crate::organism::action::Action;
use crate::organism::sense::Sense;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generates a random brain wired for the canonical sense set: one sensory
/// neuron per sense, the configured number of interneurons and motor neurons,
/// probabilistic sensory->inter and inter->motor connections, and every motor
/// neuron bound to an action drawn from the action pool.
///
/// A brain without sensory or motor neurons can never couple to the world;
/// that is the one setup error rejected before any simulation starts.
pub fn generate(config: &BrainConfig) -> Result<Brain, Box<dyn std::error::Error>> {
    let senses = Sense::all();
    if senses.is_empty() {
        return Err("brain generation requires at least one sense".into());
    }
    if config.motor_neurons == 0 {
        return Err("brain generation requires at least one motor neuron".into());
    }

    let mut rng = rand::thread_rng();
    let params = BrainParams {
        activation: *Activation::ALL.choose(&mut rng).unwrap(),
        activation_threshold: config.activation_threshold,
        initial_activation: config.initial_activation,
        memory_decay: config.memory_decay,
        weight_min: config.weight_min,
        weight_max: config.weight_max,
        init_weight_min: config.init_weight_min,
        init_weight_max: config.init_weight_max,
        learn_depth: config.learn_depth,
        decay_step: config.decay_step,
        decay_min: config.decay_min,
        decay_max: config.decay_max,
    };

    let mut brain = Brain::new(params);

    let sensory: Vec<_> = senses.into_iter().map(|s| brain.add_sensory(s)).collect();
    let inter: Vec<_> = (0..config.interneurons).map(|_| brain.add_inter()).collect();

    let actions = Action::pool();
    let motor: Vec<_> = (0..config.motor_neurons)
        .map(|_| brain.add_motor(*actions.choose(&mut rng).unwrap()))
        .collect();

    for &from in &sensory {
        for &to in &inter {
            if rng.gen::<f64>() < config.connection_probability {
                let weight = rng.gen_range(config.init_weight_min..config.init_weight_max);
                brain.connect(from, to, weight);
            }
        }
    }
    for &from in &inter {
        for &to in &motor {
            if rng.gen::<f64>() < config.connection_probability {
                let weight = rng.gen_range(config.init_weight_min..config.init_weight_max);
                brain.connect(from, to, weight);
            }
        }
    }

    Ok(brain)
}
