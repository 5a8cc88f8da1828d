use anyhow::{Context, Result, bail};
use schemars::schema_for;
use serde_json::{Map, Value};

use crate::optim::choices::{OptimizerChoice, OptimizerKind};

/// Parameter names the given optimizer kind accepts, in declaration order.
///
/// Derived from the generated schema for [`OptimizerChoice`], so the answer
/// cannot drift from the parameter structs themselves.
pub fn accepted_params(kind: OptimizerKind) -> Result<Vec<String>> {
    let root = schema_for!(OptimizerChoice);
    let root_obj = root.as_object().context("root schema is not an object")?;

    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(|v| v.as_array())
        .context("missing oneOf/anyOf")?;

    let kind_key: &'static str = kind.into();
    for branch in alts {
        let bobj = branch.as_object().context("branch is not object")?;
        let props = match bobj.get("properties").and_then(|v| v.as_object()) {
            Some(p) => p,
            None => continue,
        };

        if !discriminant_matches(props, kind_key) {
            continue;
        }

        let params_obj = match props.get("params").and_then(|v| v.as_object()) {
            Some(o) => o,
            None => return Ok(vec![]),
        };

        let params_obj = match resolve_ref_obj(root_obj, params_obj) {
            Some(o) => o,
            None => return Ok(vec![]),
        };

        let Some(params_props) = params_obj.get("properties").and_then(|v| v.as_object()) else {
            return Ok(vec![]);
        };

        return Ok(params_props.keys().cloned().collect());
    }

    bail!("no schema branch found for type={kind_key}");
}

/// Drops entries of `params` that `kind` does not accept.
///
/// [`choose`](crate::optim::choose) rejects unknown keys outright; this is
/// the explicit opt-in for callers holding a shared configuration map whose
/// extra keys are meant for other optimizers.
pub fn retain_accepted(
    kind: OptimizerKind,
    params: Map<String, Value>,
) -> Result<Map<String, Value>> {
    let accepted = accepted_params(kind)?;
    Ok(params
        .into_iter()
        .filter(|(name, _)| accepted.iter().any(|a| a == name))
        .collect())
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tval) = props.get("type") else {
        return false;
    };
    let Some(tobj) = tval.as_object() else {
        return false;
    };

    if tobj.get("const").and_then(|v| v.as_str()) == Some(kind_key) {
        return true;
    }
    if let Some(arr) = tobj.get("enum").and_then(|v| v.as_array()) {
        if arr.len() == 1 && arr[0].as_str() == Some(kind_key) {
            return true;
        }
    }
    false
}

/// Resolve a local $ref like "#/$defs/RpropParameters" against the root
/// object. Returns the referenced object map, or None if it can't be
/// resolved.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}
