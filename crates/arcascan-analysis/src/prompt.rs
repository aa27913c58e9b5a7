//! Prompt builder — renders an intake into the analysis instruction.
//!
//! The instruction embeds every intake field and the full JSON skeleton the
//! model must fill in. The output is a pure function of the intake.

use arcascan_core::types::Intake;

/// JSON skeleton the model is asked to return. Keys must match `Report`'s serde names.
pub const REPORT_SCHEMA: &str = r#"{
  "analise_mercado": {
    "contexto": "Análise do mercado e momento atual do nicho",
    "oportunidades": ["oportunidade1", "oportunidade2", "oportunidade3"],
    "ameacas": ["ameaça1", "ameaça2"]
  },
  "analise_concorrentes": [
    {
      "concorrente": "Nome",
      "estrategias_identificadas": ["estratégia1", "estratégia2"],
      "pontos_fortes": ["ponto1", "ponto2"],
      "gaps_oportunidade": ["gap1", "gap2"]
    }
  ],
  "estrategia_segmentacao": {
    "publicos_alvo": [
      {
        "nome": "Público 1",
        "caracteristicas": ["caract1", "caract2"],
        "justificativa": "Por que segmentar este público"
      }
    ],
    "recomendacao_canais": {
      "facebook_instagram": {
        "justificativa": "Por que usar",
        "budget_sugerido": "X%"
      },
      "google_ads": {
        "justificativa": "Por que usar",
        "budget_sugerido": "X%"
      }
    }
  },
  "plano_criativo": {
    "tipos_conteudo": [
      {
        "formato": "Nome do formato",
        "objetivo": "Objetivo deste formato",
        "exemplo_mensagem": "Exemplo de copy/abordagem"
      }
    ],
    "elementos_chave": ["elemento1", "elemento2", "elemento3"]
  },
  "metricas_sucesso": {
    "kpis_principais": [
      {
        "metrica": "Nome da métrica",
        "meta": "Valor alvo",
        "explicacao": "Por que esta métrica importa"
      }
    ]
  },
  "cronograma_execucao": {
    "fase1": {
      "nome": "Nome da fase",
      "duracao": "X semanas",
      "acoes": ["ação1", "ação2"]
    },
    "fase2": {
      "nome": "Nome da fase",
      "duracao": "X semanas",
      "acoes": ["ação1", "ação2"]
    },
    "fase3": {
      "nome": "Nome da fase",
      "duracao": "X semanas",
      "acoes": ["ação1", "ação2"]
    }
  },
  "proximos_passos": ["passo1", "passo2", "passo3"]
}"#;

/// Build the analysis prompt for `intake`.
pub fn build_prompt(intake: &Intake) -> String {
    format!(
        "Você é um especialista em tráfego pago e análise de mercado. \
         Analise as seguintes informações e gere um relatório estratégico completo:\n\
         \n\
         INFORMAÇÕES DO CLIENTE:\n\
         - Nome: {client}\n\
         - Nicho: {niche}\n\
         - Objetivo Principal: {goal}\n\
         - Budget Mensal: {budget}\n\
         - Concorrentes Identificados: {competitors}\n\
         - Desafios Atuais: {challenges}\n\
         \n\
         Por favor, retorne APENAS um objeto JSON (sem markdown, sem backticks) com esta estrutura:\n\
         \n\
         {schema}",
        client = intake.client_name,
        niche = intake.niche,
        goal = intake.main_goal,
        budget = intake.budget,
        competitors = intake.competitors,
        challenges = intake.current_challenges,
        schema = REPORT_SCHEMA,
    )
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
