//! Keyword-scoring fallback classifier.
//!
//! Used when the remote classifier is unavailable. Scores normalized tokens
//! against two fixed, disjoint, bilingual keyword sets: each productive hit
//! adds one, each unproductive hit subtracts one. Repeated tokens count
//! every time. A score of at least one is `Productive`; ties and negative
//! scores are `Unproductive`.

use std::collections::HashSet;
use std::sync::LazyLock;

use tracing::debug;

use crate::pipeline::types::Classification;

static PRODUCTIVE_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        // English
        "invoice", "payment", "schedule", "meeting", "follow", "timeline", "deliverable",
        "proposal", "contract", "update", "report", "deadline", "review", "sync", "plan",
        "action", "task", "next", "confirm", "confirmat", "call", "agenda", "scope",
        // Portuguese (pt-BR)
        "fatura", "boleto", "pagamento", "reuniao", "reunião", "marcar",
        "cronograma", "prazo", "entrega", "entregavel", "entregável",
        "proposta", "contrato", "atualizacao", "atualização", "relatorio", "relatório",
        "revisao", "revisão", "alinhamento", "plano", "acao", "ação", "tarefa", "proximo",
        "próximo", "confirmar", "ligacao", "ligação", "chamada", "pauta", "escopo",
        "orcamento", "orçamento", "aprovacao", "aprovação",
    ])
});

static UNPRODUCTIVE_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        // English
        "offer", "discount", "promo", "promotion", "limited", "free", "deal", "buy",
        "sale", "win", "lottery", "click", "unsubscribe", "coupon", "save",
        // Portuguese (pt-BR)
        "oferta", "desconto", "promocao", "promoção", "limitado", "gratis", "grátis",
        "gratuito", "brinde", "compre", "venda", "ganhe", "sorteio", "clique", "descadastre",
        "cupom", "economize", "spam", "publicidade",
    ])
});

/// Net keyword score: productive hits minus unproductive hits.
pub fn score<S: AsRef<str>>(tokens: &[S]) -> i64 {
    tokens.iter().fold(0, |acc, token| {
        let token = token.as_ref();
        if PRODUCTIVE_KEYWORDS.contains(token) {
            acc + 1
        } else if UNPRODUCTIVE_KEYWORDS.contains(token) {
            acc - 1
        } else {
            acc
        }
    })
}

/// Label normalized tokens without any network dependency.
pub fn classify_heuristic<S: AsRef<str>>(tokens: &[S]) -> Classification {
    if tokens.is_empty() {
        return Classification::Unproductive;
    }

    let score = score(tokens);
    let label = if score >= 1 {
        Classification::Productive
    } else {
        Classification::Unproductive
    };
    debug!(tokens = tokens.len(), score, label = %label, "Heuristic classification");
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalize::normalize;

    #[test]
    fn keyword_sets_are_disjoint() {
        assert!(PRODUCTIVE_KEYWORDS.is_disjoint(&UNPRODUCTIVE_KEYWORDS));
    }

    #[test]
    fn empty_tokens_are_unproductive() {
        let tokens: [&str; 0] = [];
        assert_eq!(classify_heuristic(&tokens), Classification::Unproductive);
    }

    #[test]
    fn single_productive_keyword() {
        assert_eq!(classify_heuristic(&["invoice"]), Classification::Productive);
    }

    #[test]
    fn tie_is_unproductive() {
        assert_eq!(
            classify_heuristic(&["meeting", "discount"]),
            Classification::Unproductive
        );
        assert_eq!(classify_heuristic(&["hello", "world"]), Classification::Unproductive);
    }

    #[test]
    fn repeated_tokens_count_each_time() {
        assert_eq!(score(&["free", "free", "free", "invoice"]), -2);
        assert_eq!(
            classify_heuristic(&["report", "report", "sale"]),
            Classification::Productive
        );
    }

    #[test]
    fn portuguese_keywords() {
        assert_eq!(
            classify_heuristic(&normalize("Reunião sobre o prazo da entrega")),
            Classification::Productive
        );
        assert_eq!(
            classify_heuristic(&normalize("Ganhe desconto grátis, clique aqui")),
            Classification::Unproductive
        );
    }

    #[test]
    fn invoice_email_is_productive() {
        let tokens = normalize("Invoice due\n\nPlease process the invoice payment by Friday");
        assert_eq!(score(&tokens), 3);
        assert_eq!(classify_heuristic(&tokens), Classification::Productive);
    }

    #[test]
    fn sale_email_is_unproductive() {
        let tokens = normalize("Big Sale!\n\nFree discount click now");
        assert_eq!(classify_heuristic(&tokens), Classification::Unproductive);
    }

    #[test]
    fn stemmed_plurals_still_match() {
        assert_eq!(
            classify_heuristic(&normalize("Meetings and deadlines")),
            Classification::Productive
        );
    }
}
