/// Stable handle into a brain's neuron arena. Connections refer to their
/// source neuron by index, never by pointer, so neurons can live in a flat
/// `Vec` and be mutated without aliasing concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeuronId(pub(crate) usize);

impl NeuronId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Directed weighted edge ending at the neuron that owns it.
#[derive(Debug, Clone)]
pub struct Connection {
    pub source: NeuronId,
    pub weight: f64,
}

/// Nonlinearity applied to the weighted input sum, picked once at
/// brain-generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Sigmoid,
    Relu,
    LeakyRelu,
    Gelu,
}

impl Activation {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Relu => x.max(0.0),
            Activation::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    0.01 * x
                }
            }
            Activation::Gelu => {
                // tanh approximation
                let inner = (2.0 / std::f64::consts::PI).sqrt() * (x + 0.044715 * x.powi(3));
                0.5 * x * (1.0 + inner.tanh())
            }
        }
    }

    pub const ALL: [Activation; 4] = [
        Activation::Sigmoid,
        Activation::Relu,
        Activation::LeakyRelu,
        Activation::Gelu,
    ];
}

#[derive(Debug, Clone)]
pub struct Neuron {
    pub activation: f64,
    pub previous_activation: f64,
    pub memory_decay: f64,
    pub incoming: Vec<Connection>,
}

impl Neuron {
    pub fn new(initial_activation: f64, memory_decay: f64) -> Self {
        Self {
            activation: initial_activation,
            previous_activation: 0.0,
            memory_decay,
            incoming: Vec::new(),
        }
    }

    /// Folds a freshly computed nonlinear output into the neuron's state.
    /// Memory blends after the nonlinearity: the decayed previous activation
    /// is what gives the neuron temporal inertia.
    pub fn absorb(&mut self, nonlinear_output: f64) {
        self.activation = nonlinear_output * (1.0 - self.memory_decay)
            + self.previous_activation * self.memory_decay;
        self.previous_activation = self.activation;
    }

    /// Shifts the memory decay one fixed step toward retaining more memory on
    /// positive reward and less on non-positive reward, clamped to
    /// `[decay_min, decay_max]`.
    pub fn adjust_memory_decay(&mut self, reward: f64, step: f64, decay_min: f64, decay_max: f64) {
        if reward > 0.0 {
            self.memory_decay = (self.memory_decay + step).min(decay_max);
        } else {
            self.memory_decay = (self.memory_decay - step).max(decay_min);
        }
    }
}
