use chrono::{DateTime, Duration, Utc};

use super::traits::MarketFeed;
use crate::models::market::{
    Impact, MarketTrend, NewsCategory, NewsItem, Opportunity, RiskLevel, TrendDirection,
};

/// Fixed, hard-coded market catalogs. No input, no network.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMarketFeed;

impl StaticMarketFeed {
    pub fn new() -> Self {
        Self
    }
}

fn trend(category: &str, trend: TrendDirection, confidence: u8, explanation: &str) -> MarketTrend {
    MarketTrend {
        category: category.to_string(),
        trend,
        confidence,
        explanation: explanation.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn news_item(
    now: DateTime<Utc>,
    id: &str,
    minutes_ago: i64,
    category: NewsCategory,
    impact: Impact,
    title: &str,
    summary: &str,
    image_url: &str,
) -> NewsItem {
    NewsItem {
        id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        category,
        impact,
        timestamp: now - Duration::minutes(minutes_ago),
        image_url: image_url.to_string(),
    }
}

impl MarketFeed for StaticMarketFeed {
    fn name(&self) -> &str {
        "static"
    }

    fn trends(&self) -> Vec<MarketTrend> {
        vec![
            trend(
                "Renda Fixa",
                TrendDirection::Bullish,
                85,
                "Com a taxa Selic em patamar elevado, títulos de renda fixa oferecem retornos \
                 atrativos com baixo risco. Ideal para reserva de emergência e objetivos de curto prazo.",
            ),
            trend(
                "Ações Brasileiras",
                TrendDirection::Neutral,
                65,
                "O mercado de ações brasileiro apresenta volatilidade moderada. Empresas de setores \
                 como energia e bancos mostram fundamentos sólidos. Recomendado para horizonte de \
                 médio a longo prazo.",
            ),
            trend(
                "Ações Internacionais",
                TrendDirection::Bullish,
                75,
                "Mercados globais, especialmente tecnologia nos EUA, apresentam tendência de alta. \
                 Diversificação internacional reduz risco cambial e aproveita crescimento global.",
            ),
            trend(
                "Criptomoedas",
                TrendDirection::Neutral,
                55,
                "Mercado cripto mantém alta volatilidade. Bitcoin e Ethereum consolidam-se como \
                 ativos digitais principais. Recomendado apenas para investidores com alta \
                 tolerância ao risco e horizonte longo.",
            ),
        ]
    }

    fn news(&self, now: DateTime<Utc>) -> Vec<NewsItem> {
        vec![
            news_item(
                now,
                "news-1",
                15,
                NewsCategory::Stocks,
                Impact::High,
                "Ibovespa fecha em alta de 1,2% impulsionado por setor bancário",
                "Ações de bancos lideram ganhos após anúncio de resultados trimestrais acima do \
                 esperado. Analistas recomendam manter posições.",
                "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=400&h=300&fit=crop",
            ),
            news_item(
                now,
                "news-2",
                45,
                NewsCategory::Crypto,
                Impact::High,
                "Bitcoin ultrapassa R$ 350 mil com expectativa de aprovação de ETFs",
                "Criptomoeda principal registra valorização de 8% na semana. Investidores aguardam \
                 decisões regulatórias nos EUA.",
                "https://images.unsplash.com/photo-1621761191319-c6fb62004040?w=400&h=300&fit=crop",
            ),
            news_item(
                now,
                "news-3",
                90,
                NewsCategory::Economy,
                Impact::Medium,
                "Banco Central mantém Selic em 11,75% ao ano",
                "Decisão unânime do Copom mantém taxa básica de juros. Renda fixa continua atrativa \
                 para investidores conservadores.",
                "https://images.unsplash.com/photo-1579621970563-ebec7560ff3e?w=400&h=300&fit=crop",
            ),
            news_item(
                now,
                "news-4",
                120,
                NewsCategory::International,
                Impact::Medium,
                "Petróleo em queda após aumento de produção da OPEP+",
                "Barril do petróleo tipo Brent recua 3,5% no mercado internacional. Ações de \
                 petroleiras brasileiras acompanham movimento.",
                "https://images.unsplash.com/photo-1541888946425-d81bb19240f5?w=400&h=300&fit=crop",
            ),
            news_item(
                now,
                "news-5",
                180,
                NewsCategory::Economy,
                Impact::Low,
                "Dólar fecha em R$ 5,85 com fluxo positivo de investimentos",
                "Moeda americana registra queda de 0,8% frente ao real. Entrada de capital \
                 estrangeiro fortalece mercado brasileiro.",
                "https://images.unsplash.com/photo-1580519542036-c47de6196ba5?w=400&h=300&fit=crop",
            ),
        ]
    }

    fn opportunities(&self) -> Vec<Opportunity> {
        vec![
            Opportunity {
                id: "opp-1".to_string(),
                title: "Tesouro IPCA+ 2035 com taxa atrativa".to_string(),
                description: "Título público oferece IPCA + 6,2% ao ano, ideal para proteção contra \
                              inflação e objetivos de longo prazo."
                    .to_string(),
                asset: "IPCA+ 2035".to_string(),
                category: "Renda Fixa".to_string(),
                risk_level: RiskLevel::Low,
                potential_return: 12.5,
                action_required: "Considere alocar parte da reserva de longo prazo".to_string(),
                image_url: "https://images.unsplash.com/photo-1554224155-8d04cb21cd6c?w=400&h=300&fit=crop"
                    .to_string(),
            },
            Opportunity {
                id: "opp-2".to_string(),
                title: "VALE3 em ponto de entrada técnico".to_string(),
                description: "Ação da Vale apresenta suporte forte em R$ 62,50 com fundamentos \
                              sólidos e dividendos atrativos."
                    .to_string(),
                asset: "VALE3".to_string(),
                category: "Ações".to_string(),
                risk_level: RiskLevel::Medium,
                potential_return: 18.0,
                action_required: "Analise para entrada gradual em 2-3 compras".to_string(),
                image_url: "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=400&h=300&fit=crop"
                    .to_string(),
            },
        ]
    }
}

/// The static trend catalog, without going through a feed instance.
pub fn analyze_trends() -> Vec<MarketTrend> {
    StaticMarketFeed.trends()
}
