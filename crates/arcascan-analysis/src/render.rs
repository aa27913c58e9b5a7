//! Report renderer — `Report` + `Intake` → self-contained HTML document.
//!
//! Output is deterministic: the generation date is passed in, lists are
//! emitted in input order, and every piece of user or model text is escaped.

use std::fmt::Write as _;

use arcascan_core::types::{ChannelRecommendation, Intake, Phase, ProviderKind, Report};
use arcascan_providers::spec;

const STYLESHEET: &str = r#"    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 40px; }
    .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 10px; margin-bottom: 30px; }
    .header h1 { margin: 0; font-size: 32px; }
    .header p { margin: 10px 0 0 0; opacity: 0.9; }
    .section { margin-bottom: 40px; page-break-inside: avoid; }
    .section-title { color: #667eea; font-size: 24px; border-bottom: 3px solid #667eea; padding-bottom: 10px; margin-bottom: 20px; }
    .subsection { background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
    .subsection-title { color: #764ba2; font-size: 18px; margin-bottom: 15px; font-weight: bold; }
    .info-box { background: white; border-left: 4px solid #667eea; padding: 15px; margin: 10px 0; }
    .competitor-card { background: white; border: 2px solid #e0e0e0; padding: 20px; border-radius: 8px; margin-bottom: 15px; }
    .competitor-card h3 { color: #667eea; margin-top: 0; }
    .gaps { background: #d4edda; padding: 10px; border-radius: 5px; }
    .audience-card { background: #fff3cd; border-left: 4px solid #ffc107; padding: 15px; margin: 10px 0; }
    .audience-card h4 { margin-top: 0; color: #856404; }
    .content-card { background: white; border: 1px solid #dee2e6; padding: 15px; margin: 10px 0; border-radius: 5px; }
    .content-card h4 { color: #667eea; margin-top: 0; }
    .metric-card { background: #d1ecf1; border-left: 4px solid #17a2b8; padding: 15px; margin: 10px 0; }
    .metric-card h4 { margin-top: 0; color: #0c5460; }
    ul { margin: 10px 0; padding-left: 25px; }
    li { margin: 8px 0; }
    .channel { margin: 15px 0; }
    .highlight { background: #fff3cd; padding: 2px 6px; border-radius: 3px; }
    .timeline { border-left: 3px solid #667eea; padding-left: 20px; margin: 20px 0; }
    .phase { margin-bottom: 25px; }
    .phase-title { font-weight: bold; color: #764ba2; font-size: 18px; }
    .steps li { margin: 15px 0; font-size: 16px; }
    .footer { margin-top: 50px; padding-top: 20px; border-top: 2px solid #e0e0e0; text-align: center; color: #666; }
"#;

/// Render the full report document.
///
/// `generated_on` is printed verbatim in the footer (see
/// [`arcascan_core::utils::today_br`]).
pub fn render_report(
    report: &Report,
    intake: &Intake,
    provider: ProviderKind,
    generated_on: &str,
) -> String {
    let mut html = HtmlBuilder::default();
    html.open(intake, spec(provider).report_name);
    html.client_info(intake);
    html.market(report);
    html.competitors(report, &intake.competitors);
    html.segmentation(report);
    html.creative(report);
    html.metrics(report);
    html.timeline(report);
    html.next_steps(report);
    html.close(generated_on);
    html.buf
}

/// Escape text for HTML.
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Default)]
struct HtmlBuilder {
    buf: String,
}

impl HtmlBuilder {
    fn open(&mut self, intake: &Intake, provider_name: &str) {
        let _ = write!(
            self.buf,
            "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  \
             <title>ARCA SCAN - {client}</title>\n  <style>\n{STYLESHEET}  </style>\n</head>\n<body>\n",
            client = esc(&intake.client_name),
        );
        let _ = writeln!(
            self.buf,
            "  <div class=\"header\">\n    <h1>🎯 ARCA SCAN - Relatório Estratégico</h1>\n    \
             <p>Análise Completa de Tráfego Pago e Inteligência de Mercado</p>\n    \
             <p><strong>Cliente:</strong> {} | <strong>Nicho:</strong> {}</p>\n    \
             <p style=\"font-size: 12px; opacity: 0.8;\">Gerado com: {}</p>\n  </div>",
            esc(&intake.client_name),
            esc(&intake.niche),
            esc(provider_name),
        );
    }

    fn section_start(&mut self, title: &str) {
        let _ = write!(
            self.buf,
            "\n  <div class=\"section\">\n    <div class=\"section-title\">{title}</div>\n"
        );
    }

    fn section_end(&mut self) {
        self.buf.push_str("  </div>\n");
    }

    fn subsection_start(&mut self, title: &str) {
        let _ = write!(
            self.buf,
            "    <div class=\"subsection\">\n      <div class=\"subsection-title\">{title}</div>\n"
        );
    }

    fn subsection_end(&mut self) {
        self.buf.push_str("    </div>\n");
    }

    fn list(&mut self, tag: &str, class: Option<&str>, items: &[String]) {
        match class {
            Some(class) => {
                let _ = write!(self.buf, "      <{tag} class=\"{class}\">");
            }
            None => {
                let _ = write!(self.buf, "      <{tag}>");
            }
        }
        for item in items {
            let _ = write!(self.buf, "<li>{}</li>", esc(item));
        }
        let _ = writeln!(self.buf, "</{tag}>");
    }

    fn client_info(&mut self, intake: &Intake) {
        self.section_start("📊 INFORMAÇÕES DO CLIENTE");
        for (label, value) in [
            ("Objetivo Principal", &intake.main_goal),
            ("Budget Mensal", &intake.budget),
            ("Desafios Atuais", &intake.current_challenges),
        ] {
            let _ = writeln!(
                self.buf,
                "    <div class=\"info-box\"><strong>{label}:</strong> {}</div>",
                esc(value)
            );
        }
        self.section_end();
    }

    fn market(&mut self, report: &Report) {
        let market = &report.market_analysis;
        self.section_start("🌍 ANÁLISE DE MERCADO");

        self.subsection_start("Contexto de Mercado");
        let _ = writeln!(self.buf, "      <p>{}</p>", esc(&market.context));
        self.subsection_end();

        self.subsection_start("✅ Oportunidades Identificadas");
        self.list("ul", None, &market.opportunities);
        self.subsection_end();

        self.subsection_start("⚠️ Ameaças e Desafios");
        self.list("ul", None, &market.threats);
        self.subsection_end();

        self.section_end();
    }

    fn competitors(&mut self, report: &Report, named_by_client: &str) {
        self.section_start("🔍 ANÁLISE DE CONCORRENTES");
        let _ = writeln!(
            self.buf,
            "    <p><em>Baseado nos concorrentes identificados: {}</em></p>",
            esc(named_by_client)
        );
        for competitor in &report.competitors {
            let _ = writeln!(
                self.buf,
                "    <div class=\"competitor-card\">\n      <h3>{}</h3>",
                esc(&competitor.name)
            );
            self.buf.push_str("      <strong>Estratégias Identificadas:</strong>\n");
            self.list("ul", None, &competitor.strategies);
            self.buf.push_str("      <strong>Pontos Fortes:</strong>\n");
            self.list("ul", None, &competitor.strengths);
            self.buf.push_str(
                "      <div class=\"gaps\">\n      \
                 <strong>🎯 Gaps de Oportunidade (onde você pode vencer):</strong>\n",
            );
            self.list("ul", None, &competitor.opportunity_gaps);
            self.buf.push_str("      </div>\n    </div>\n");
        }
        self.section_end();
    }

    fn segmentation(&mut self, report: &Report) {
        let seg = &report.segmentation;
        self.section_start("🎯 ESTRATÉGIA DE SEGMENTAÇÃO");

        self.subsection_start("Públicos-Alvo Recomendados");
        for audience in &seg.target_audiences {
            let _ = writeln!(
                self.buf,
                "      <div class=\"audience-card\">\n        <h4>{}</h4>\n        \
                 <p><strong>Características:</strong></p>",
                esc(&audience.name)
            );
            self.list("ul", None, &audience.traits);
            let _ = writeln!(
                self.buf,
                "        <p><strong>Por que segmentar este público:</strong><br>{}</p>\n      </div>",
                esc(&audience.rationale)
            );
        }
        self.subsection_end();

        self.subsection_start("Recomendação de Canais");
        self.channel("Facebook &amp; Instagram Ads", &seg.channels.facebook_instagram);
        self.channel("Google Ads", &seg.channels.google_ads);
        self.subsection_end();

        self.section_end();
    }

    fn channel(&mut self, heading: &str, channel: &ChannelRecommendation) {
        let _ = writeln!(
            self.buf,
            "      <div class=\"channel\">\n        <h4>{heading}</h4>\n        <p>{}</p>\n        \
             <p class=\"highlight\">Budget Sugerido: {}</p>\n      </div>",
            esc(&channel.rationale),
            esc(&channel.suggested_budget)
        );
    }

    fn creative(&mut self, report: &Report) {
        let plan = &report.creative_plan;
        self.section_start("🎨 PLANO CRIATIVO");

        self.subsection_start("Tipos de Conteúdo Recomendados");
        for content in &plan.content_types {
            let _ = writeln!(
                self.buf,
                "      <div class=\"content-card\">\n        <h4>{}</h4>\n        \
                 <p><strong>Objetivo:</strong> {}</p>\n        \
                 <p><strong>Exemplo de Mensagem/Copy:</strong><br><em>&quot;{}&quot;</em></p>\n      </div>",
                esc(&content.format),
                esc(&content.goal),
                esc(&content.sample_message)
            );
        }
        self.subsection_end();

        self.subsection_start("Elementos-Chave para Criativos");
        self.list("ul", None, &plan.key_elements);
        self.subsection_end();

        self.section_end();
    }

    fn metrics(&mut self, report: &Report) {
        self.section_start("📈 MÉTRICAS DE SUCESSO");
        self.buf
            .push_str("    <p><em>Como vamos medir o sucesso desta estratégia:</em></p>\n");
        for kpi in &report.success_metrics.kpis {
            let _ = writeln!(
                self.buf,
                "    <div class=\"metric-card\">\n      <h4>{}</h4>\n      \
                 <p><strong>Meta:</strong> {}</p>\n      \
                 <p><strong>Por que esta métrica importa:</strong><br>{}</p>\n    </div>",
                esc(&kpi.metric),
                esc(&kpi.meta),
                esc(&kpi.explanation)
            );
        }
        self.section_end();
    }

    fn timeline(&mut self, report: &Report) {
        self.section_start("📅 CRONOGRAMA DE EXECUÇÃO");
        self.buf.push_str("    <div class=\"timeline\">\n");
        for (i, phase) in report.timeline.phases().into_iter().enumerate() {
            self.phase(i + 1, phase);
        }
        self.buf.push_str("    </div>\n");
        self.section_end();
    }

    fn phase(&mut self, number: usize, phase: &Phase) {
        let _ = writeln!(
            self.buf,
            "      <div class=\"phase\">\n        <div class=\"phase-title\">Fase {number}: {}</div>\n        \
             <p><strong>Duração:</strong> {}</p>",
            esc(&phase.name),
            esc(&phase.duration)
        );
        self.list("ul", None, &phase.actions);
        self.buf.push_str("      </div>\n");
    }

    fn next_steps(&mut self, report: &Report) {
        self.section_start("🚀 PRÓXIMOS PASSOS");
        self.list("ol", Some("steps"), &report.next_steps);
        self.section_end();
    }

    fn close(&mut self, generated_on: &str) {
        let _ = write!(
            self.buf,
            "\n  <div class=\"footer\">\n    <p><strong>Relatório gerado por ARCA SCAN</strong></p>\n    \
             <p>Análise estratégica de tráfego pago baseada em inteligência artificial</p>\n    \
             <p style=\"font-size: 12px; margin-top: 20px;\">Data de geração: {}</p>\n  </div>\n\
             </body>\n</html>\n",
            esc(generated_on)
        );
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
