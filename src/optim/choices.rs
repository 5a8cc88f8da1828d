use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_step_rate() -> f64 {
    0.1
}

fn default_eta0() -> f64 {
    0.02
}

fn default_lambda() -> f64 {
    1e-4
}

fn default_n_factors() -> u64 {
    10
}

fn default_hessian_diag() -> f64 {
    1.0
}

fn default_min_grad() -> f64 {
    1e-6
}

fn default_step_shrink() -> f64 {
    0.5
}

fn default_step_grow() -> f64 {
    1.2
}

fn default_min_step() -> f64 {
    1e-6
}

fn default_max_step() -> f64 {
    1.0
}

/// How minibatches are drawn for the stochastic methods.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MinibatchParameters {
    #[schemars(
        title = "Sample Count",
        description = "Total number of rows in the training set",
        range(min = 1)
    )]
    pub n_samples: u64,

    #[schemars(
        title = "Batch Size",
        description = "Rows per minibatch; the trailing batch may be short",
        range(min = 1)
    )]
    pub batch_size: u64,

    #[serde(default)]
    #[schemars(
        title = "With Replacement",
        description = "Draw each batch independently instead of in shuffled full passes"
    )]
    pub with_replacement: bool,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed", default = "default_seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MomentumKind {
    #[default]
    Standard,
    Nesterov,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GradientDescentParameters {
    #[serde(default = "default_step_rate")]
    #[schemars(
        title = "Step Rate",
        description = "Gradient scaling applied on every update",
        range(min = 0.0),
        default = "default_step_rate"
    )]
    pub step_rate: f64,

    #[serde(default)]
    #[schemars(
        title = "Momentum",
        description = "Fraction of the previous update carried into the next one",
        range(min = 0.0, max = 1.0)
    )]
    pub momentum: f64,

    #[serde(default)]
    #[schemars(
        title = "Momentum Kind",
        description = "Standard or Nesterov momentum update"
    )]
    pub momentum_kind: MomentumKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AsgdParameters {
    #[serde(default = "default_eta0")]
    #[schemars(
        title = "Initial Step Rate",
        description = "Step rate before decay kicks in",
        range(min = 0.0),
        default = "default_eta0"
    )]
    pub eta0: f64,

    #[serde(default = "default_lambda")]
    #[schemars(
        title = "Decay",
        description = "Step rate decay coefficient",
        range(min = 0.0),
        default = "default_lambda"
    )]
    pub lambda: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LbfgsParameters {
    #[serde(default = "default_n_factors")]
    #[schemars(
        title = "Factors",
        description = "Number of curvature pairs kept in the rolling window",
        range(min = 1),
        default = "default_n_factors"
    )]
    pub n_factors: u64,

    #[serde(default = "default_hessian_diag")]
    #[schemars(
        title = "Initial Hessian Diagonal",
        description = "Scale of the initial inverse-Hessian estimate",
        range(min = 0.0),
        default = "default_hessian_diag"
    )]
    pub initial_hessian_diag: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NonlinearConjugateGradientParameters {
    #[serde(default = "default_min_grad")]
    #[schemars(
        title = "Minimum Gradient",
        description = "Gradient norm below which a direction reset happens",
        range(min = 0.0),
        default = "default_min_grad"
    )]
    pub min_grad: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RpropParameters {
    #[serde(default = "default_step_shrink")]
    #[schemars(
        title = "Step Shrink",
        description = "Factor applied when the gradient sign flips",
        range(min = 0.0, max = 1.0),
        default = "default_step_shrink"
    )]
    pub step_shrink: f64,

    #[serde(default = "default_step_grow")]
    #[schemars(
        title = "Step Grow",
        description = "Factor applied when the gradient sign persists",
        range(min = 1.0),
        default = "default_step_grow"
    )]
    pub step_grow: f64,

    #[serde(default = "default_min_step")]
    #[schemars(
        title = "Minimum Step",
        description = "Lower bound on per-parameter step sizes",
        range(min = 0.0),
        default = "default_min_step"
    )]
    pub min_step: f64,

    #[serde(default = "default_max_step")]
    #[schemars(
        title = "Maximum Step",
        description = "Upper bound on per-parameter step sizes",
        range(min = 0.0),
        default = "default_max_step"
    )]
    pub max_step: f64,
}

/// Registry of optimizers this layer can select and configure.
///
/// The numerical routines themselves live in downstream crates; a choice
/// carries the validated hyperparameters such a routine is constructed from.
/// Stochastic methods additionally take a [`MinibatchParameters`] describing
/// how they draw batches (see
/// [`MinibatchStream`](crate::batching::MinibatchStream)).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params")]
#[strum_discriminants(name(OptimizerKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
pub enum OptimizerChoice {
    #[serde(rename = "gd")]
    #[strum_discriminants(strum(
        serialize = "gd",
        message = "Gradient Descent",
        detailed_message = "Plain first-order descent with optional momentum."
    ))]
    GradientDescent(GradientDescentParameters),

    #[serde(rename = "asgd")]
    #[strum_discriminants(strum(
        serialize = "asgd",
        message = "Averaged Stochastic Gradient Descent",
        detailed_message = "Stochastic descent with iterate averaging."
    ))]
    Asgd(AsgdParameters),

    #[serde(rename = "lbfgs")]
    #[strum_discriminants(strum(
        serialize = "lbfgs",
        message = "L-BFGS",
        detailed_message = "Limited-memory quasi-Newton with a rolling curvature window."
    ))]
    Lbfgs(LbfgsParameters),

    #[serde(rename = "ncg")]
    #[strum_discriminants(strum(
        serialize = "ncg",
        message = "Nonlinear Conjugate Gradient",
        detailed_message = "Conjugate-direction descent for smooth objectives."
    ))]
    NonlinearConjugateGradient(NonlinearConjugateGradientParameters),

    #[serde(rename = "rprop")]
    #[strum_discriminants(strum(
        serialize = "rprop",
        message = "Resilient Propagation",
        detailed_message = "Sign-based updates with per-parameter adaptive step sizes."
    ))]
    Rprop(RpropParameters),
}

impl OptimizerChoice {
    pub fn kind(&self) -> OptimizerKind {
        self.into()
    }
}
