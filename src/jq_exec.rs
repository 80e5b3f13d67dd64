use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::{Error, Result};

/// Run a jq filter over one document; each output becomes its own document.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let mut it = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    while let Some(item) = it.next() {
        let v = item.map_err(|e| Error::Jq(format!("{e:?}")))?;
        // Val: Display -> JSON text
        let text = v.to_string();
        let doc = serde_json::from_str::<Value>(&text).map_err(|e| Error::Json {
            context: format!("jq output of `{filter_src}`"),
            message: e.to_string(),
        })?;
        out.push(doc);
    }
    Ok(out)
}

fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> Error {
    let mut s = String::new();
    for (file, err) in errs {
        s.push_str(&format!("parse error: {err:?} in `{}`\n", file.code));
    }
    Error::Jq(s.trim_end().to_string())
}

fn format_undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> Error {
    let mut s = String::new();
    for (file, list) in errs {
        for (name, undef) in list {
            s.push_str(&format!("undefined `{name}`: {undef:?} in `{}`\n", file.code));
        }
    }
    Error::Jq(s.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_fans_out_documents() {
        let doc = json!({ "items": [{ "id": 1 }, { "id": 2 }] });
        let out = run_jaq(".items[]", &doc).unwrap();
        assert_eq!(out, vec![json!({ "id": 1 }), json!({ "id": 2 })]);
    }

    #[test]
    fn bad_filter_is_a_jq_error() {
        let err = run_jaq(".[", &json!(null)).unwrap_err();
        assert!(matches!(err, Error::Jq(_)));
    }
}
