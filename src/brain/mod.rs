pub mod generator;
pub mod neuron;
pub mod snapshot;

use crate::organism::action::Action;
use crate::organism::sense::Sense;
use neuron::{Activation, Connection, Neuron, NeuronId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Immutable per-brain tuning, threaded in at construction time.
#[derive(Debug, Clone, Copy)]
pub struct BrainParams {
    pub activation: Activation,
    pub activation_threshold: f64,
    pub initial_activation: f64,
    pub memory_decay: f64,
    pub weight_min: f64,
    pub weight_max: f64,
    pub init_weight_min: f64,
    pub init_weight_max: f64,
    pub learn_depth: u32,
    pub decay_step: f64,
    pub decay_min: f64,
    pub decay_max: f64,
}

impl Default for BrainParams {
    fn default() -> Self {
        Self {
            activation: Activation::Sigmoid,
            activation_threshold: 0.1,
            initial_activation: 0.2,
            memory_decay: 0.9,
            weight_min: -5.0,
            weight_max: 5.0,
            init_weight_min: -0.5,
            init_weight_max: 0.5,
            learn_depth: 8,
            decay_step: 0.05,
            decay_min: 0.5,
            decay_max: 1.0,
        }
    }
}

/// A fixed topology of sensory, inter and motor neurons wired by weighted
/// connections, plus the mapping from motor neurons to actions. Each brain
/// exclusively owns its neurons; nothing is shared across organisms.
#[derive(Debug, Clone)]
pub struct Brain {
    neurons: Vec<Neuron>,
    sensory: Vec<NeuronId>,
    inter: Vec<NeuronId>,
    motor: Vec<NeuronId>,
    /// Index-aligned with `sensory`.
    senses: Vec<Sense>,
    /// Index-aligned with `motor`. Many motor neurons may map to one action.
    motor_actions: Vec<Action>,
    params: BrainParams,
}

impl Brain {
    pub fn new(params: BrainParams) -> Self {
        Self {
            neurons: Vec::new(),
            sensory: Vec::new(),
            inter: Vec::new(),
            motor: Vec::new(),
            senses: Vec::new(),
            motor_actions: Vec::new(),
            params,
        }
    }

    fn alloc(&mut self) -> NeuronId {
        let id = NeuronId(self.neurons.len());
        self.neurons
            .push(Neuron::new(self.params.initial_activation, self.params.memory_decay));
        id
    }

    pub fn add_sensory(&mut self, sense: Sense) -> NeuronId {
        let id = self.alloc();
        self.sensory.push(id);
        self.senses.push(sense);
        id
    }

    pub fn add_inter(&mut self) -> NeuronId {
        let id = self.alloc();
        self.inter.push(id);
        id
    }

    pub fn add_motor(&mut self, action: Action) -> NeuronId {
        let id = self.alloc();
        self.motor.push(id);
        self.motor_actions.push(action);
        id
    }

    pub fn connect(&mut self, source: NeuronId, target: NeuronId, weight: f64) {
        self.neurons[target.0].incoming.push(Connection { source, weight });
    }

    pub fn senses(&self) -> &[Sense] {
        &self.senses
    }

    pub fn params(&self) -> &BrainParams {
        &self.params
    }

    pub fn activation(&self, id: NeuronId) -> f64 {
        self.neurons[id.0].activation
    }

    pub fn memory_decay(&self, id: NeuronId) -> f64 {
        self.neurons[id.0].memory_decay
    }

    pub fn connection_count(&self) -> usize {
        self.neurons.iter().map(|n| n.incoming.len()).sum()
    }

    pub fn incoming_weights(&self, id: NeuronId) -> Vec<f64> {
        self.neurons[id.0].incoming.iter().map(|c| c.weight).collect()
    }

    /// Recomputes one neuron's activation from its incoming connections.
    /// Neurons without inputs keep their current activation untouched.
    fn compute_activation(&mut self, id: NeuronId) {
        if self.neurons[id.0].incoming.is_empty() {
            return;
        }

        let weighted_sum: f64 = self.neurons[id.0]
            .incoming
            .iter()
            .map(|c| self.neurons[c.source.0].activation * c.weight)
            .sum();
        let output = self.params.activation.apply(weighted_sum);
        self.neurons[id.0].absorb(output);
    }

    /// Assigns sensory activations from the input map (absent senses read as
    /// 0.0), then runs two sequential passes: all interneurons in declared
    /// order, then all motor neurons in declared order. This is deliberately
    /// NOT a dependency-ordered propagation; an interneuron chain of length k
    /// settles over k ticks, and the learned dynamics depend on that lag.
    pub fn process_input(&mut self, sensory_data: &HashMap<Sense, f64>) {
        for i in 0..self.sensory.len() {
            let value = sensory_data.get(&self.senses[i]).copied().unwrap_or(0.0);
            self.neurons[self.sensory[i].0].activation = value;
        }

        for i in 0..self.inter.len() {
            self.compute_activation(self.inter[i]);
        }
        for i in 0..self.motor.len() {
            self.compute_activation(self.motor[i]);
        }
    }

    /// Picks the action of the most active motor neuron, provided its
    /// activation exceeds the trigger threshold. Ties go to the earliest
    /// motor neuron in declared order. Returns `None` for an idle tick.
    pub fn trigger_single_action(&self) -> Option<Action> {
        let mut best: Option<(usize, f64)> = None;
        for (i, id) in self.motor.iter().enumerate() {
            let activation = self.neurons[id.0].activation;
            match best {
                Some((_, max)) if activation <= max => {}
                _ => best = Some((i, activation)),
            }
        }

        let (index, activation) = best?;
        if activation > self.params.activation_threshold {
            Some(self.motor_actions[index])
        } else {
            None
        }
    }

    /// Reward-driven weight adaptation. The motor stage moves each incoming
    /// weight toward reducing the error between reward and motor activation,
    /// clipped to the configured bounds. Credit then flows backward through a
    /// depth-bounded traversal: each visited neuron nudges its memory decay by
    /// the reward sign and applies a Hebbian update
    /// `lr * scaled_reward * source_activation` to every incoming connection,
    /// with the reward rescaled by `1 / (depth + 0.5)` per hop. Every update
    /// lands inside the same weight bounds as the motor stage.
    pub fn adjust_weights_based_on_reward(&mut self, reward: f64, learning_rate: f64) {
        if reward == 0.0 {
            return;
        }

        for m in 0..self.motor.len() {
            let motor_id = self.motor[m];
            let motor_activation = self.neurons[motor_id.0].activation;

            for c in 0..self.neurons[motor_id.0].incoming.len() {
                let source = self.neurons[motor_id.0].incoming[c].source;
                let error = reward - motor_activation;
                let update = learning_rate * error * self.neurons[source.0].activation;
                let conn = &mut self.neurons[motor_id.0].incoming[c];
                conn.weight =
                    (conn.weight + update).clamp(self.params.weight_min, self.params.weight_max);
            }

            self.propagate_credit(motor_id, reward, learning_rate);
        }
    }

    /// Iterative replacement for the naturally recursive backward pass; an
    /// explicit work list keeps dense or cyclic connection graphs from
    /// blowing the call stack. Visit order does not matter: updates read only
    /// activations, which are frozen during learning.
    fn propagate_credit(&mut self, start: NeuronId, reward: f64, learning_rate: f64) {
        let mut work = vec![(start, reward, 1u32)];

        while let Some((id, reward, depth)) = work.pop() {
            let params = self.params;
            self.neurons[id.0].adjust_memory_decay(
                reward,
                params.decay_step,
                params.decay_min,
                params.decay_max,
            );

            let scaled = reward / (depth as f64 + 0.5);
            for c in 0..self.neurons[id.0].incoming.len() {
                let source = self.neurons[id.0].incoming[c].source;
                let contribution = self.neurons[source.0].activation;
                let conn = &mut self.neurons[id.0].incoming[c];
                conn.weight = (conn.weight + learning_rate * scaled * contribution)
                    .clamp(params.weight_min, params.weight_max);

                if depth < params.learn_depth {
                    work.push((source, scaled, depth + 1));
                }
            }
        }
    }

    /// Drops every connection whose weight lies strictly inside
    /// `(-threshold, threshold)` and reports how many were removed.
    pub fn prune_weak_connections(&mut self, threshold: f64) -> usize {
        let mut pruned = 0;
        for neuron in &mut self.neurons {
            let before = neuron.incoming.len();
            neuron
                .incoming
                .retain(|c| c.weight <= -threshold || c.weight >= threshold);
            pruned += before - neuron.incoming.len();
        }
        pruned
    }

    /// Adds exactly `count` connections with random endpoints: sources drawn
    /// from sensory and interneurons, targets from inter and motor neurons,
    /// weights uniform over the init range.
    pub fn grow_random_connections(&mut self, count: usize) {
        let sources: Vec<NeuronId> =
            self.sensory.iter().chain(self.inter.iter()).copied().collect();
        let targets: Vec<NeuronId> =
            self.inter.iter().chain(self.motor.iter()).copied().collect();
        if sources.is_empty() || targets.is_empty() {
            return;
        }

        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let source = *sources.choose(&mut rng).unwrap();
            let target = *targets.choose(&mut rng).unwrap();
            let weight =
                rng.gen_range(self.params.init_weight_min..self.params.init_weight_max);
            self.connect(source, target, weight);
        }
    }

    pub fn sensory_ids(&self) -> &[NeuronId] {
        &self.sensory
    }

    pub fn inter_ids(&self) -> &[NeuronId] {
        &self.inter
    }

    pub fn motor_ids(&self) -> &[NeuronId] {
        &self.motor
    }

    pub(crate) fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }
}
