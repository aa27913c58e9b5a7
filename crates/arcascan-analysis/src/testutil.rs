//! Fixtures shared by the unit tests in this crate.

use serde_json::{json, Value};

use arcascan_core::types::{Intake, Report};

/// The intake used across the end-to-end scenarios.
pub fn loja_x() -> Intake {
    Intake {
        client_name: "Loja X".into(),
        niche: "moda".into(),
        main_goal: "crescer".into(),
        budget: "R$1000".into(),
        competitors: "A, B".into(),
        current_challenges: "CPA alto".into(),
    }
}

/// A complete report with two competitors, three opportunities and two threats.
pub fn sample_report_value() -> Value {
    json!({
        "analise_mercado": {
            "contexto": "Moda online em expansão",
            "oportunidades": ["Reels de provador", "Parcerias locais", "Remarketing"],
            "ameacas": ["Marketplaces", "Alta do CPM"]
        },
        "analise_concorrentes": [
            {
                "concorrente": "Concorrente A",
                "estrategias_identificadas": ["Frete grátis"],
                "pontos_fortes": ["Marca forte"],
                "gaps_oportunidade": ["Atendimento lento"]
            },
            {
                "concorrente": "Concorrente B",
                "estrategias_identificadas": ["Influenciadores", "Cupons"],
                "pontos_fortes": ["Preço"],
                "gaps_oportunidade": ["Pouco conteúdo em vídeo"]
            }
        ],
        "estrategia_segmentacao": {
            "publicos_alvo": [{
                "nome": "Mulheres 25-34",
                "caracteristicas": ["Compram pelo celular"],
                "justificativa": "Maior ticket médio"
            }],
            "recomendacao_canais": {
                "facebook_instagram": { "justificativa": "Descoberta visual", "budget_sugerido": "60%" },
                "google_ads": { "justificativa": "Demanda ativa", "budget_sugerido": "40%" }
            }
        },
        "plano_criativo": {
            "tipos_conteudo": [{
                "formato": "Reels",
                "objetivo": "Alcance",
                "exemplo_mensagem": "Look completo por menos de R$199"
            }],
            "elementos_chave": ["Prova social", "Urgência"]
        },
        "metricas_sucesso": {
            "kpis_principais": [{
                "metrica": "CPA",
                "meta": "R$25",
                "explicacao": "Custo por venda sustentável"
            }]
        },
        "cronograma_execucao": {
            "fase1": { "nome": "Estruturação", "duracao": "1 semana", "acoes": ["Pixel", "Catálogo"] },
            "fase2": { "nome": "Testes", "duracao": "2 semanas", "acoes": ["Testes A/B"] },
            "fase3": { "nome": "Escala", "duracao": "4 semanas", "acoes": ["Aumentar budget"] }
        },
        "proximos_passos": ["Instalar pixel", "Gravar criativos", "Subir campanhas"]
    })
}

pub fn sample_report() -> Report {
    serde_json::from_value(sample_report_value()).unwrap()
}
