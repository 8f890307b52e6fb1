//! Criterion filter: which checklist lines are machine-checkable
//!
//! A line qualifies when, after leading whitespace and bullets are removed, it
//! starts with the checklist marker and its normalized text mentions one of the
//! configured action verbs. Everything else (headers, prose, malformed lines)
//! is dropped silently.

use std::collections::HashSet;

use crate::config::FilterConfig;
use crate::text::normalize;

/// Leading characters treated as list bullets
const BULLETS: &[char] = &['-', '•', '*'];

/// Predicate over raw checklist lines built from a [`FilterConfig`]
#[derive(Debug, Clone)]
pub struct CriterionFilter {
    marker: String,
    verbs: Option<Vec<String>>,
    min_words: usize,
}

impl CriterionFilter {
    pub fn new(config: &FilterConfig) -> Self {
        let verbs = config.require_action_verb.then(|| {
            config
                .action_verbs
                .iter()
                .map(|v| normalize(v).trim().to_string())
                .filter(|v| !v.is_empty())
                .collect()
        });

        Self {
            marker: config.marker.clone(),
            verbs,
            min_words: config.min_words,
        }
    }

    /// Whether a raw line is an actionable, checkable criterion
    pub fn is_valid(&self, line: &str) -> bool {
        let Some(body) = strip_bullets(line).strip_prefix(self.marker.as_str()) else {
            return false;
        };

        if self.min_words > 0 && body.split_whitespace().count() < self.min_words {
            return false;
        }

        match &self.verbs {
            Some(verbs) => {
                let normalized = normalize(body);
                verbs.iter().any(|verb| normalized.contains(verb.as_str()))
            }
            None => true,
        }
    }

    /// Display text of a valid line: bullets and marker removed, trimmed
    pub fn display_text(&self, line: &str) -> String {
        let stripped = strip_bullets(line);
        stripped
            .strip_prefix(self.marker.as_str())
            .unwrap_or(stripped)
            .trim()
            .to_string()
    }

    /// Valid criteria of a checklist, in order, without duplicates
    pub fn parse(&self, checklist: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        checklist
            .lines()
            .filter(|line| self.is_valid(line))
            .map(|line| self.display_text(line))
            .filter(|text| !text.is_empty() && seen.insert(text.clone()))
            .collect()
    }
}

/// Convenience wrapper around [`CriterionFilter::parse`]
pub fn parse_checklist(checklist: &str, config: &FilterConfig) -> Vec<String> {
    CriterionFilter::new(config).parse(checklist)
}

fn strip_bullets(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_whitespace() || BULLETS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKLIST: &str = "\
### Entrada de Dados
[ ] Validar entrada do usuário com número inteiro
- [ ] Exibir o menu de opções
• [ ] Adicionar cliente na fila
[ ] O código está bem organizado
Processamento:
[x] Remover cliente da fila
  [ ]   Listar todos os clientes
";

    fn filter() -> CriterionFilter {
        CriterionFilter::new(&FilterConfig::default())
    }

    #[test]
    fn test_marker_and_verb_required() {
        let f = filter();
        assert!(f.is_valid("[ ] Validar entrada do usuário com número inteiro"));
        assert!(!f.is_valid("Validar entrada do usuário"));
        assert!(!f.is_valid("[x] Remover cliente da fila"));
        assert!(!f.is_valid("[ ] O código está bem organizado"));
    }

    #[test]
    fn test_header_is_never_a_criterion() {
        assert!(!filter().is_valid("### Entrada de Dados"));
    }

    #[test]
    fn test_bullets_and_whitespace_are_stripped() {
        let f = filter();
        assert!(f.is_valid("  - [ ] Exibir o menu"));
        assert!(f.is_valid("• [ ] Adicionar cliente"));
        assert_eq!(f.display_text("  - [ ]  Exibir o menu  "), "Exibir o menu");
    }

    #[test]
    fn test_verbs_match_accented_lines() {
        let f = filter();
        assert!(f.is_valid("[ ] MOSTRAR o total"));
        assert!(f.is_valid("[ ] Incluír opção de saída"));
    }

    #[test]
    fn test_parse_checklist_keeps_order() {
        let criteria = filter().parse(CHECKLIST);
        assert_eq!(
            criteria,
            vec![
                "Validar entrada do usuário com número inteiro",
                "Exibir o menu de opções",
                "Adicionar cliente na fila",
                "Listar todos os clientes",
            ]
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let f = filter();
        assert_eq!(f.parse(CHECKLIST), f.parse(CHECKLIST));
    }

    #[test]
    fn test_duplicates_collapse() {
        let text = "[ ] Exibir o menu\n- [ ] Exibir o menu\n";
        assert_eq!(filter().parse(text), vec!["Exibir o menu"]);
    }

    #[test]
    fn test_verb_requirement_can_be_disabled() {
        let config = FilterConfig {
            require_action_verb: false,
            ..FilterConfig::default()
        };
        let f = CriterionFilter::new(&config);
        assert!(f.is_valid("[ ] O código está bem organizado"));
        assert!(!f.is_valid("O código está bem organizado"));
    }

    #[test]
    fn test_custom_verbs() {
        let config = FilterConfig {
            action_verbs: vec!["calcular".to_string()],
            ..FilterConfig::default()
        };
        let f = CriterionFilter::new(&config);
        assert!(f.is_valid("[ ] Calcular a média"));
        assert!(!f.is_valid("[ ] Exibir o menu"));
    }

    #[test]
    fn test_min_words() {
        let config = FilterConfig {
            min_words: 4,
            ..FilterConfig::default()
        };
        let f = CriterionFilter::new(&config);
        assert!(!f.is_valid("[ ] Exibir menu"));
        assert!(f.is_valid("[ ] Exibir o menu principal"));
    }

    #[test]
    fn test_empty_checklist() {
        assert!(parse_checklist("", &FilterConfig::default()).is_empty());
    }
}
