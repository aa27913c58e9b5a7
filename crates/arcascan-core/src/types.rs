//! Core types for ARCA SCAN — intake form, provider selection, and the report schema.
//!
//! The report mirrors the JSON object the prompt asks the model to return, so the
//! serde names are the Portuguese keys used on the wire while the Rust fields stay
//! in English.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Intake
// ─────────────────────────────────────────────

/// Client/campaign description filled in by the user before an analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Intake {
    pub client_name: String,
    pub niche: String,
    pub main_goal: String,
    pub budget: String,
    pub competitors: String,
    pub current_challenges: String,
}

impl Intake {
    /// Read a single field.
    pub fn get(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::ClientName => &self.client_name,
            IntakeField::Niche => &self.niche,
            IntakeField::MainGoal => &self.main_goal,
            IntakeField::Budget => &self.budget,
            IntakeField::Competitors => &self.competitors,
            IntakeField::CurrentChallenges => &self.current_challenges,
        }
    }

    /// Overwrite a single field.
    pub fn set(&mut self, field: IntakeField, value: impl Into<String>) {
        let value = value.into();
        match field {
            IntakeField::ClientName => self.client_name = value,
            IntakeField::Niche => self.niche = value,
            IntakeField::MainGoal => self.main_goal = value,
            IntakeField::Budget => self.budget = value,
            IntakeField::Competitors => self.competitors = value,
            IntakeField::CurrentChallenges => self.current_challenges = value,
        }
    }

    /// First required field, in form order, that is empty or whitespace-only.
    pub fn missing_required(&self) -> Option<IntakeField> {
        IntakeField::ALL
            .into_iter()
            .find(|f| f.is_required() && self.get(*f).trim().is_empty())
    }

    /// Whether every field is an empty string.
    pub fn is_empty(&self) -> bool {
        IntakeField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

/// The six intake fields, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntakeField {
    ClientName,
    Niche,
    MainGoal,
    Budget,
    Competitors,
    CurrentChallenges,
}

impl IntakeField {
    pub const ALL: [IntakeField; 6] = [
        IntakeField::ClientName,
        IntakeField::Niche,
        IntakeField::MainGoal,
        IntakeField::Budget,
        IntakeField::Competitors,
        IntakeField::CurrentChallenges,
    ];

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            IntakeField::ClientName => "Nome do Cliente",
            IntakeField::Niche => "Nicho",
            IntakeField::MainGoal => "Objetivo Principal",
            IntakeField::Budget => "Budget Mensal",
            IntakeField::Competitors => "Concorrentes",
            IntakeField::CurrentChallenges => "Desafios Atuais",
        }
    }

    /// camelCase key used in intake JSON files.
    pub fn key(self) -> &'static str {
        match self {
            IntakeField::ClientName => "clientName",
            IntakeField::Niche => "niche",
            IntakeField::MainGoal => "mainGoal",
            IntakeField::Budget => "budget",
            IntakeField::Competitors => "competitors",
            IntakeField::CurrentChallenges => "currentChallenges",
        }
    }

    /// Fields that must be non-empty before a request may start.
    pub fn is_required(self) -> bool {
        matches!(self, IntakeField::ClientName | IntakeField::Niche)
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─────────────────────────────────────────────
// Provider selection
// ─────────────────────────────────────────────

/// One of the three supported completion services.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Claude,
    Gpt,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::Claude, ProviderKind::Gpt, ProviderKind::Gemini];

    /// Identifier used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Claude => "claude",
            ProviderKind::Gpt => "gpt",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(ProviderKind::Claude),
            "gpt" | "openai" | "chatgpt" => Ok(ProviderKind::Gpt),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            other => Err(format!(
                "unknown provider '{other}' (expected one of: claude, gpt, gemini)"
            )),
        }
    }
}

// ─────────────────────────────────────────────
// Report
// ─────────────────────────────────────────────

/// Strategic analysis returned by the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "analise_mercado")]
    pub market_analysis: MarketAnalysis,
    #[serde(rename = "analise_concorrentes")]
    pub competitors: Vec<Competitor>,
    #[serde(rename = "estrategia_segmentacao")]
    pub segmentation: Segmentation,
    #[serde(rename = "plano_criativo")]
    pub creative_plan: CreativePlan,
    #[serde(rename = "metricas_sucesso")]
    pub success_metrics: SuccessMetrics,
    #[serde(rename = "cronograma_execucao")]
    pub timeline: Timeline,
    #[serde(rename = "proximos_passos")]
    pub next_steps: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    #[serde(rename = "contexto")]
    pub context: String,
    #[serde(rename = "oportunidades")]
    pub opportunities: Vec<String>,
    #[serde(rename = "ameacas")]
    pub threats: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    #[serde(rename = "concorrente")]
    pub name: String,
    #[serde(rename = "estrategias_identificadas")]
    pub strategies: Vec<String>,
    #[serde(rename = "pontos_fortes")]
    pub strengths: Vec<String>,
    #[serde(rename = "gaps_oportunidade")]
    pub opportunity_gaps: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    #[serde(rename = "publicos_alvo")]
    pub target_audiences: Vec<Audience>,
    #[serde(rename = "recomendacao_canais")]
    pub channels: ChannelRecommendations,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Audience {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "caracteristicas")]
    pub traits: Vec<String>,
    #[serde(rename = "justificativa")]
    pub rationale: String,
}

/// Budget split between the two fixed paid-traffic channels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecommendations {
    pub facebook_instagram: ChannelRecommendation,
    pub google_ads: ChannelRecommendation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecommendation {
    #[serde(rename = "justificativa")]
    pub rationale: String,
    #[serde(rename = "budget_sugerido")]
    pub suggested_budget: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreativePlan {
    #[serde(rename = "tipos_conteudo")]
    pub content_types: Vec<ContentType>,
    #[serde(rename = "elementos_chave")]
    pub key_elements: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    #[serde(rename = "formato")]
    pub format: String,
    #[serde(rename = "objetivo")]
    pub goal: String,
    #[serde(rename = "exemplo_mensagem")]
    pub sample_message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuccessMetrics {
    #[serde(rename = "kpis_principais")]
    pub kpis: Vec<Kpi>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    #[serde(rename = "metrica")]
    pub metric: String,
    pub meta: String,
    #[serde(rename = "explicacao")]
    pub explanation: String,
}

/// Execution timeline — always exactly three phases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(rename = "fase1")]
    pub phase1: Phase,
    #[serde(rename = "fase2")]
    pub phase2: Phase,
    #[serde(rename = "fase3")]
    pub phase3: Phase,
}

impl Timeline {
    /// The three phases in execution order.
    pub fn phases(&self) -> [&Phase; 3] {
        [&self.phase1, &self.phase2, &self.phase3]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "duracao")]
    pub duration: String,
    #[serde(rename = "acoes")]
    pub actions: Vec<String>,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_report_json() -> serde_json::Value {
        json!({
            "analise_mercado": {
                "contexto": "Mercado aquecido",
                "oportunidades": ["o1", "o2"],
                "ameacas": ["t1"]
            },
            "analise_concorrentes": [{
                "concorrente": "A",
                "estrategias_identificadas": ["s1"],
                "pontos_fortes": ["p1"],
                "gaps_oportunidade": ["g1"]
            }],
            "estrategia_segmentacao": {
                "publicos_alvo": [{
                    "nome": "Jovens",
                    "caracteristicas": ["18-24"],
                    "justificativa": "Alto engajamento"
                }],
                "recomendacao_canais": {
                    "facebook_instagram": { "justificativa": "Visual", "budget_sugerido": "60%" },
                    "google_ads": { "justificativa": "Intenção", "budget_sugerido": "40%" }
                }
            },
            "plano_criativo": {
                "tipos_conteudo": [{
                    "formato": "Reels",
                    "objetivo": "Alcance",
                    "exemplo_mensagem": "Novidades!"
                }],
                "elementos_chave": ["cor"]
            },
            "metricas_sucesso": {
                "kpis_principais": [{ "metrica": "CPA", "meta": "R$20", "explicacao": "Custo" }]
            },
            "cronograma_execucao": {
                "fase1": { "nome": "Setup", "duracao": "1 semana", "acoes": ["a"] },
                "fase2": { "nome": "Teste", "duracao": "2 semanas", "acoes": ["b"] },
                "fase3": { "nome": "Escala", "duracao": "4 semanas", "acoes": ["c"] }
            },
            "proximos_passos": ["p1", "p2"]
        })
    }

    #[test]
    fn test_report_deserializes_portuguese_keys() {
        let report: Report = serde_json::from_value(sample_report_json()).unwrap();
        assert_eq!(report.market_analysis.context, "Mercado aquecido");
        assert_eq!(report.competitors[0].name, "A");
        assert_eq!(report.segmentation.channels.google_ads.suggested_budget, "40%");
        assert_eq!(report.success_metrics.kpis[0].meta, "R$20");
        assert_eq!(report.timeline.phases()[2].name, "Escala");
        assert_eq!(report.next_steps, vec!["p1", "p2"]);
    }

    #[test]
    fn test_report_serializes_back_to_wire_keys() {
        let report: Report = serde_json::from_value(sample_report_json()).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, sample_report_json());
    }

    #[test]
    fn test_intake_camel_case_json() {
        let intake: Intake = serde_json::from_value(json!({
            "clientName": "Loja X",
            "niche": "moda",
            "currentChallenges": "CPA alto"
        }))
        .unwrap();
        assert_eq!(intake.client_name, "Loja X");
        assert_eq!(intake.current_challenges, "CPA alto");
        assert_eq!(intake.budget, "");
    }

    #[test]
    fn test_intake_get_set() {
        let mut intake = Intake::default();
        assert!(intake.is_empty());
        intake.set(IntakeField::Budget, "R$1000");
        assert_eq!(intake.get(IntakeField::Budget), "R$1000");
        assert!(!intake.is_empty());
    }

    #[test]
    fn test_missing_required_in_form_order() {
        let mut intake = Intake::default();
        assert_eq!(intake.missing_required(), Some(IntakeField::ClientName));
        intake.set(IntakeField::ClientName, "Loja X");
        intake.set(IntakeField::Niche, "   ");
        assert_eq!(intake.missing_required(), Some(IntakeField::Niche));
        intake.set(IntakeField::Niche, "moda");
        assert_eq!(intake.missing_required(), None);
    }

    #[test]
    fn test_required_fields() {
        let required: Vec<_> = IntakeField::ALL
            .iter()
            .filter(|f| f.is_required())
            .collect();
        assert_eq!(required, vec![&IntakeField::ClientName, &IntakeField::Niche]);
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("claude".parse::<ProviderKind>().unwrap(), ProviderKind::Claude);
        assert_eq!("GPT".parse::<ProviderKind>().unwrap(), ProviderKind::Gpt);
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::Gpt);
        assert_eq!(" gemini ".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert!("llama".parse::<ProviderKind>().unwrap_err().contains("llama"));
    }

    #[test]
    fn test_provider_kind_serde() {
        assert_eq!(serde_json::to_value(ProviderKind::Gpt).unwrap(), json!("gpt"));
        let kind: ProviderKind = serde_json::from_value(json!("gemini")).unwrap();
        assert_eq!(kind, ProviderKind::Gemini);
        assert_eq!(ProviderKind::default(), ProviderKind::Claude);
    }
}
