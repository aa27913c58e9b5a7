//! Response normaliser — completion text → validated `Report`.
//!
//! Models often wrap the JSON in a markdown code fence despite being told not to.
//! The fence is stripped, the remainder parsed, and the result checked against the
//! full report shape before it is deserialised, so an incomplete answer fails here
//! with a precise field path instead of somewhere in the renderer.

use serde_json::Value;
use tracing::debug;

use arcascan_core::types::Report;

use crate::error::{NormalizeError, SchemaError};

const FENCE: &str = "```";

// ─────────────────────────────────────────────
// Fence stripping
// ─────────────────────────────────────────────

/// Strip leading/trailing code-fence markers (optionally tagged `json`) and whitespace.
///
/// Repeats until nothing changes, so applying it to its own output is a no-op.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    loop {
        let before = text.len();
        if let Some(rest) = text.strip_prefix(FENCE) {
            text = strip_json_tag(rest);
        }
        if let Some(rest) = text.strip_suffix(FENCE) {
            text = rest;
        }
        text = text.trim();
        if text.len() == before {
            return text;
        }
    }
}

fn strip_json_tag(s: &str) -> &str {
    match s.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &s[4..],
        _ => s,
    }
}

/// Strip fences and parse the remainder as JSON.
pub fn parse_completion(raw: &str) -> Result<Value, NormalizeError> {
    Ok(serde_json::from_str(strip_code_fences(raw))?)
}

// ─────────────────────────────────────────────
// Report shape
// ─────────────────────────────────────────────

/// Expected JSON shape of one report node.
enum Shape {
    /// A text value. Numbers and booleans are accepted and converted to text.
    Text,
    List(&'static Shape),
    Object(&'static [(&'static str, Shape)]),
}

impl Shape {
    fn expected(&self) -> &'static str {
        match self {
            Shape::Text => "string",
            Shape::List(_) => "array",
            Shape::Object(_) => "object",
        }
    }
}

const TEXT_LIST: Shape = Shape::List(&Shape::Text);

const COMPETITOR: Shape = Shape::Object(&[
    ("concorrente", Shape::Text),
    ("estrategias_identificadas", TEXT_LIST),
    ("pontos_fortes", TEXT_LIST),
    ("gaps_oportunidade", TEXT_LIST),
]);

const AUDIENCE: Shape = Shape::Object(&[
    ("nome", Shape::Text),
    ("caracteristicas", TEXT_LIST),
    ("justificativa", Shape::Text),
]);

const CHANNEL: Shape = Shape::Object(&[
    ("justificativa", Shape::Text),
    ("budget_sugerido", Shape::Text),
]);

const CONTENT_TYPE: Shape = Shape::Object(&[
    ("formato", Shape::Text),
    ("objetivo", Shape::Text),
    ("exemplo_mensagem", Shape::Text),
]);

const KPI: Shape = Shape::Object(&[
    ("metrica", Shape::Text),
    ("meta", Shape::Text),
    ("explicacao", Shape::Text),
]);

const PHASE: Shape = Shape::Object(&[
    ("nome", Shape::Text),
    ("duracao", Shape::Text),
    ("acoes", TEXT_LIST),
]);

const REPORT: Shape = Shape::Object(&[
    (
        "analise_mercado",
        Shape::Object(&[
            ("contexto", Shape::Text),
            ("oportunidades", TEXT_LIST),
            ("ameacas", TEXT_LIST),
        ]),
    ),
    ("analise_concorrentes", Shape::List(&COMPETITOR)),
    (
        "estrategia_segmentacao",
        Shape::Object(&[
            ("publicos_alvo", Shape::List(&AUDIENCE)),
            (
                "recomendacao_canais",
                Shape::Object(&[("facebook_instagram", CHANNEL), ("google_ads", CHANNEL)]),
            ),
        ]),
    ),
    (
        "plano_criativo",
        Shape::Object(&[
            ("tipos_conteudo", Shape::List(&CONTENT_TYPE)),
            ("elementos_chave", TEXT_LIST),
        ]),
    ),
    (
        "metricas_sucesso",
        Shape::Object(&[("kpis_principais", Shape::List(&KPI))]),
    ),
    (
        "cronograma_execucao",
        Shape::Object(&[("fase1", PHASE), ("fase2", PHASE), ("fase3", PHASE)]),
    ),
    ("proximos_passos", TEXT_LIST),
]);

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: &str, shape: &Shape, found: &str) -> SchemaError {
    SchemaError {
        path: if path.is_empty() { "<root>".to_string() } else { path.to_string() },
        expected: shape.expected(),
        found: found.to_string(),
    }
}

/// Check `value` against `shape`, converting scalar text fields in place.
fn conform(value: &mut Value, shape: &Shape, path: &str) -> Result<(), SchemaError> {
    match shape {
        Shape::Text => match value {
            Value::String(_) => Ok(()),
            Value::Number(n) => {
                *value = Value::String(n.to_string());
                Ok(())
            }
            Value::Bool(b) => {
                *value = Value::String(b.to_string());
                Ok(())
            }
            other => Err(mismatch(path, shape, kind_of(other))),
        },
        Shape::List(item) => match value {
            Value::Array(items) => {
                for (i, v) in items.iter_mut().enumerate() {
                    conform(v, item, &format!("{path}[{i}]"))?;
                }
                Ok(())
            }
            other => Err(mismatch(path, shape, kind_of(other))),
        },
        Shape::Object(fields) => match value {
            Value::Object(map) => {
                for (key, field_shape) in fields.iter() {
                    let child = if path.is_empty() {
                        (*key).to_string()
                    } else {
                        format!("{path}.{key}")
                    };
                    match map.get_mut(*key) {
                        Some(v) => conform(v, field_shape, &child)?,
                        None => return Err(mismatch(&child, field_shape, "missing")),
                    }
                }
                Ok(())
            }
            other => Err(mismatch(path, shape, kind_of(other))),
        },
    }
}

/// Validate a parsed completion against the full report shape.
///
/// Returns the first missing or mistyped field. Extra fields are ignored.
pub fn validate_report(value: &Value) -> Result<(), SchemaError> {
    conform(&mut value.clone(), &REPORT, "")
}

/// Strip, parse, validate and deserialise a completion into a `Report`.
pub fn normalize_completion(raw: &str) -> Result<Report, NormalizeError> {
    let mut value = parse_completion(raw)?;
    conform(&mut value, &REPORT, "")?;
    let report: Report = serde_json::from_value(value)?;
    debug!(
        competitors = report.competitors.len(),
        kpis = report.success_metrics.kpis.len(),
        "completion normalised into report"
    );
    Ok(report)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::REPORT_SCHEMA;
    use crate::testutil::sample_report_value;

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_bare_fence_and_whitespace() {
        assert_eq!(strip_code_fences("  \n```\n[1, 2]\n```  \n"), "[1, 2]");
    }

    #[test]
    fn test_strip_uppercase_tag() {
        assert_eq!(strip_code_fences("```JSON\n{}\n```"), "{}");
    }

    #[test]
    fn test_strip_unfenced_is_trim() {
        assert_eq!(strip_code_fences("  {\"a\": \"```\"}  "), "{\"a\": \"```\"}");
    }

    #[test]
    fn test_strip_only_fence() {
        assert_eq!(strip_code_fences("```"), "");
        assert_eq!(strip_code_fences("```json```"), "");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let inputs = [
            "```json\n{\"a\":1}\n```",
            "```json```json\n{}\n``````",
            "``````",
            "plain text",
            "  ```\n  ```json \n 1 \n```\n```  ",
            "",
        ];
        for input in inputs {
            let once = strip_code_fences(input);
            assert_eq!(strip_code_fences(once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_fenced_parses_same_as_bare() {
        let bare = sample_report_value().to_string();
        for wrapped in [
            format!("```json\n{bare}\n```"),
            format!("```\n{bare}\n```"),
            format!("```json{bare}```"),
            format!("\n\n{bare}\n"),
        ] {
            let fenced = parse_completion(&wrapped).unwrap();
            let direct: Value = serde_json::from_str(&bare).unwrap();
            assert_eq!(fenced, direct);
        }
    }

    #[test]
    fn test_parse_error_on_prose() {
        let err = parse_completion("Desculpe, não posso ajudar.").unwrap_err();
        assert!(matches!(err, NormalizeError::Parse(_)));
    }

    #[test]
    fn test_parse_error_on_fenced_garbage() {
        let err = parse_completion("```json\n{\"a\": \n```").unwrap_err();
        assert!(matches!(err, NormalizeError::Parse(_)));
    }

    #[test]
    fn test_validate_accepts_full_report() {
        assert_eq!(validate_report(&sample_report_value()), Ok(()));
    }

    #[test]
    fn test_prompt_skeleton_is_a_valid_report() {
        let report = normalize_completion(REPORT_SCHEMA).unwrap();
        assert_eq!(report.timeline.phase3.duration, "X semanas");
    }

    #[test]
    fn test_validate_missing_top_level_section() {
        let mut value = sample_report_value();
        value.as_object_mut().unwrap().remove("metricas_sucesso");
        let err = validate_report(&value).unwrap_err();
        assert_eq!(err.path, "metricas_sucesso");
        assert_eq!(err.expected, "object");
        assert_eq!(err.found, "missing");
    }

    #[test]
    fn test_validate_missing_nested_list_field() {
        let mut value = sample_report_value();
        value["analise_concorrentes"][1]
            .as_object_mut()
            .unwrap()
            .remove("pontos_fortes");
        let err = validate_report(&value).unwrap_err();
        assert_eq!(err.path, "analise_concorrentes[1].pontos_fortes");
        assert_eq!(err.expected, "array");
    }

    #[test]
    fn test_validate_wrong_type() {
        let mut value = sample_report_value();
        value["cronograma_execucao"]["fase2"] = Value::String("duas semanas".into());
        let err = validate_report(&value).unwrap_err();
        assert_eq!(err.path, "cronograma_execucao.fase2");
        assert_eq!(err.found, "string");
    }

    #[test]
    fn test_validate_null_list_item() {
        let mut value = sample_report_value();
        value["proximos_passos"][0] = Value::Null;
        let err = validate_report(&value).unwrap_err();
        assert_eq!(err.path, "proximos_passos[0]");
        assert_eq!(err.found, "null");
    }

    #[test]
    fn test_validate_non_object_root() {
        let err = validate_report(&serde_json::json!([1, 2])).unwrap_err();
        assert_eq!(err.path, "<root>");
    }

    #[test]
    fn test_normalize_converts_numeric_text() {
        let mut value = sample_report_value();
        value["metricas_sucesso"]["kpis_principais"][0]["meta"] = serde_json::json!(20);
        value["estrategia_segmentacao"]["recomendacao_canais"]["google_ads"]["budget_sugerido"] =
            serde_json::json!(40.5);
        let report = normalize_completion(&value.to_string()).unwrap();
        assert_eq!(report.success_metrics.kpis[0].meta, "20");
        assert_eq!(
            report.segmentation.channels.google_ads.suggested_budget,
            "40.5"
        );
    }

    #[test]
    fn test_normalize_ignores_extra_fields() {
        let mut value = sample_report_value();
        value["resumo"] = serde_json::json!("extra");
        assert!(normalize_completion(&value.to_string()).is_ok());
    }

    #[test]
    fn test_normalize_schema_error() {
        let err = normalize_completion("```json\n{\"analise_mercado\": {}}\n```").unwrap_err();
        match err {
            NormalizeError::Schema(e) => assert_eq!(e.path, "analise_mercado.contexto"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }
}
