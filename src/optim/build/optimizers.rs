use serde_json::{Map, Value, json};

use crate::optim::build::BuildError;
use crate::optim::choices::{OptimizerChoice, OptimizerKind};

/// Selects and configures an optimizer by its registry identifier.
///
/// `params` is the loosely-typed configuration for the chosen optimizer.
/// Missing keys take their defaults; unknown keys are an error. Pass
/// `Value::Null` to configure everything from defaults. Callers that need to
/// tolerate keys meant for other optimizers filter first with
/// [`retain_accepted`](crate::optim::retain_accepted).
pub fn choose(identifier: &str, params: Value) -> Result<OptimizerChoice, BuildError> {
    let kind: OptimizerKind = identifier
        .parse()
        .map_err(|_| BuildError::UnknownOptimizer(identifier.to_string()))?;

    let params = match params {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    let tagged = json!({
        "type": <&'static str>::from(kind),
        "params": params,
    });

    let choice: OptimizerChoice = serde_json::from_value(tagged)
        .map_err(|err| BuildError::InvalidParameter(err.to_string()))?;
    choice.validate()?;
    Ok(choice)
}

impl OptimizerChoice {
    /// Checks the hyperparameter ranges the schema alone cannot express.
    pub fn validate(&self) -> Result<(), BuildError> {
        match self {
            OptimizerChoice::GradientDescent(p) => {
                ensure_positive("step_rate", p.step_rate)?;
                if !(0.0..1.0).contains(&p.momentum) {
                    return Err(BuildError::InvalidParameter(
                        "momentum must be in [0, 1)".into(),
                    ));
                }
                Ok(())
            }
            OptimizerChoice::Asgd(p) => {
                ensure_positive("eta0", p.eta0)?;
                if p.lambda < 0.0 {
                    return Err(BuildError::InvalidParameter("lambda must be >= 0".into()));
                }
                Ok(())
            }
            OptimizerChoice::Lbfgs(p) => {
                if p.n_factors == 0 {
                    return Err(BuildError::InvalidParameter("n_factors must be >= 1".into()));
                }
                ensure_positive("initial_hessian_diag", p.initial_hessian_diag)
            }
            OptimizerChoice::NonlinearConjugateGradient(p) => {
                ensure_positive("min_grad", p.min_grad)
            }
            OptimizerChoice::Rprop(p) => {
                if p.step_shrink <= 0.0 || p.step_shrink >= 1.0 {
                    return Err(BuildError::InvalidParameter(
                        "step_shrink must be in (0, 1)".into(),
                    ));
                }
                if p.step_grow <= 1.0 {
                    return Err(BuildError::InvalidParameter("step_grow must be > 1".into()));
                }
                if p.min_step <= 0.0 || p.min_step > p.max_step {
                    return Err(BuildError::InvalidParameter(
                        "steps must satisfy 0 < min_step <= max_step".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<(), BuildError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(BuildError::InvalidParameter(format!("{name} must be > 0")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::choices::MomentumKind;
    use strum::IntoEnumIterator;

    #[test]
    fn every_registered_identifier_resolves() {
        for kind in OptimizerKind::iter() {
            let identifier: &'static str = kind.into();
            let choice = choose(identifier, Value::Null).unwrap();
            assert_eq!(choice.kind(), kind);
        }
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = choose("adamw", Value::Null).unwrap_err();
        assert!(matches!(err, BuildError::UnknownOptimizer(_)));
    }

    #[test]
    fn missing_params_take_their_defaults() {
        let choice = choose("gd", Value::Null).unwrap();
        let OptimizerChoice::GradientDescent(p) = choice else {
            panic!("expected gd");
        };
        assert_eq!(p.step_rate, 0.1);
        assert_eq!(p.momentum, 0.0);
        assert_eq!(p.momentum_kind, MomentumKind::Standard);
    }

    #[test]
    fn supplied_params_override_defaults() {
        let choice = choose(
            "gd",
            json!({"step_rate": 0.01, "momentum": 0.9, "momentum_kind": "nesterov"}),
        )
        .unwrap();
        let OptimizerChoice::GradientDescent(p) = choice else {
            panic!("expected gd");
        };
        assert_eq!(p.step_rate, 0.01);
        assert_eq!(p.momentum, 0.9);
        assert_eq!(p.momentum_kind, MomentumKind::Nesterov);
    }

    #[test]
    fn unknown_keys_are_rejected_not_dropped() {
        let err = choose("gd", json!({"step_rate": 0.01, "n_factors": 5})).unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter(_)));
    }

    #[test]
    fn out_of_range_hyperparameters_are_rejected() {
        let err = choose("gd", json!({"step_rate": 0.0})).unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter(_)));

        let err = choose("gd", json!({"momentum": 1.0})).unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter(_)));

        let err = choose("lbfgs", json!({"n_factors": 0})).unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter(_)));

        let err = choose("rprop", json!({"step_grow": 0.9})).unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter(_)));

        let err = choose("rprop", json!({"min_step": 2.0, "max_step": 1.0})).unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter(_)));
    }

    #[test]
    fn choices_round_trip_through_json() {
        let choice = choose("rprop", json!({"step_grow": 1.5})).unwrap();
        let value = serde_json::to_value(&choice).unwrap();
        assert_eq!(value["type"], "rprop");
        assert_eq!(value["params"]["step_grow"], 1.5);

        let back: OptimizerChoice = serde_json::from_value(value).unwrap();
        assert_eq!(back.kind(), OptimizerKind::Rprop);
    }

    #[test]
    fn kind_names_parse_back() {
        assert_eq!(
            "ncg".parse::<OptimizerKind>().unwrap(),
            OptimizerKind::NonlinearConjugateGradient
        );
        assert_eq!(OptimizerKind::Lbfgs.to_string(), "lbfgs");
    }
}
