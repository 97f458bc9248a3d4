use super::Brain;
use serde::{Deserialize, Serialize};

/// Read-only view of a brain for external visualizers. The core exposes the
/// graph as plain data and owns no rendering logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainSnapshot {
    pub neurons: Vec<NeuronSnapshot>,
    pub connections: Vec<ConnectionSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeuronKind {
    Sensory,
    Inter,
    Motor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronSnapshot {
    pub index: usize,
    pub kind: NeuronKind,
    pub activation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSnapshot {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

impl From<&Brain> for BrainSnapshot {
    fn from(brain: &Brain) -> Self {
        let mut kinds = vec![NeuronKind::Inter; brain.neurons().len()];
        for id in brain.sensory_ids() {
            kinds[id.index()] = NeuronKind::Sensory;
        }
        for id in brain.motor_ids() {
            kinds[id.index()] = NeuronKind::Motor;
        }

        let neurons = brain
            .neurons()
            .iter()
            .enumerate()
            .map(|(index, neuron)| NeuronSnapshot {
                index,
                kind: kinds[index],
                activation: neuron.activation,
            })
            .collect();

        let mut connections = Vec::new();
        for (target, neuron) in brain.neurons().iter().enumerate() {
            for connection in &neuron.incoming {
                connections.push(ConnectionSnapshot {
                    source: connection.source.index(),
                    target,
                    weight: connection.weight,
                });
            }
        }

        Self {
            neurons,
            connections,
        }
    }
}

impl Brain {
    pub fn snapshot(&self) -> BrainSnapshot {
        BrainSnapshot::from(self)
    }
}
