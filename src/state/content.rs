//! Guide pages explaining how the league plays: the Swiss-system pairing
//! and the ELO rating model. The engine for both lives server-side; these
//! pages only describe it.

use liga_api::Locale;

/// One block of guide content. A closed set with an exhaustive renderer —
/// adding a variant forces every renderer to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Heading(String),
    Paragraph(String),
    Bullets(Vec<String>),
    Callout { title: String, body: String },
    Formula(String),
}

/// Flatten blocks into plain lines; the draw layer applies styling.
pub fn render_blocks(blocks: &[ContentBlock]) -> Vec<String> {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            ContentBlock::Heading(text) => {
                lines.push(format!("# {text}"));
                lines.push(String::new());
            }
            ContentBlock::Paragraph(text) => {
                lines.push(text.clone());
                lines.push(String::new());
            }
            ContentBlock::Bullets(items) => {
                for item in items {
                    lines.push(format!("  • {item}"));
                }
                lines.push(String::new());
            }
            ContentBlock::Callout { title, body } => {
                lines.push(format!("[{title}]"));
                lines.push(format!("  {body}"));
                lines.push(String::new());
            }
            ContentBlock::Formula(text) => {
                lines.push(format!("    {text}"));
                lines.push(String::new());
            }
        }
    }
    lines
}

pub fn swiss_pairing_guide(locale: Locale) -> Vec<ContentBlock> {
    match locale {
        Locale::Es => vec![
            ContentBlock::Heading("Sistema suizo".into()),
            ContentBlock::Paragraph(
                "Cada ronda te empareja con alguien con resultados parecidos a los tuyos. \
                 Nadie queda eliminado: juegas todas las rondas de la temporada."
                    .into(),
            ),
            ContentBlock::Bullets(vec![
                "Ronda 1: emparejamientos por nivel declarado".into(),
                "Rondas siguientes: emparejamientos por puntuación acumulada".into(),
                "No te enfrentas dos veces al mismo rival".into(),
            ]),
            ContentBlock::Callout {
                title: "Playoffs".into(),
                body: "Los 8 primeros juegan el Playoff A y los 8 siguientes el Playoff B."
                    .into(),
            },
        ],
        Locale::En => vec![
            ContentBlock::Heading("Swiss system".into()),
            ContentBlock::Paragraph(
                "Each round pairs you against someone with results similar to yours. \
                 Nobody gets knocked out: you play every round of the season."
                    .into(),
            ),
            ContentBlock::Bullets(vec![
                "Round 1: pairings by declared level".into(),
                "Later rounds: pairings by accumulated score".into(),
                "You never face the same opponent twice".into(),
            ]),
            ContentBlock::Callout {
                title: "Playoffs".into(),
                body: "The top 8 play Playoff A and the next 8 play Playoff B.".into(),
            },
        ],
    }
}

pub fn elo_rating_guide(locale: Locale) -> Vec<ContentBlock> {
    match locale {
        Locale::Es => vec![
            ContentBlock::Heading("Puntuación ELO".into()),
            ContentBlock::Paragraph(
                "Tu ELO sube o baja según el resultado y el nivel del rival. Ganar a \
                 alguien con más ELO da más puntos que ganar a alguien con menos."
                    .into(),
            ),
            ContentBlock::Formula("E = 1 / (1 + 10^((R_rival − R_tuyo) / 400))".into()),
            ContentBlock::Paragraph(
                "Todos empiezan con 1200 puntos. El factor K es 32, así que un solo \
                 partido nunca mueve tu puntuación más de 32 puntos."
                    .into(),
            ),
        ],
        Locale::En => vec![
            ContentBlock::Heading("ELO rating".into()),
            ContentBlock::Paragraph(
                "Your ELO moves with each result and with the strength of your opponent. \
                 Beating a higher-rated player earns more than beating a lower-rated one."
                    .into(),
            ),
            ContentBlock::Formula("E = 1 / (1 + 10^((R_opp − R_you) / 400))".into()),
            ContentBlock::Paragraph(
                "Everyone starts at 1200 points. The K-factor is 32, so a single match \
                 never moves your rating by more than 32 points."
                    .into(),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_handles_every_block_variant() {
        let blocks = vec![
            ContentBlock::Heading("H".into()),
            ContentBlock::Paragraph("P".into()),
            ContentBlock::Bullets(vec!["a".into(), "b".into()]),
            ContentBlock::Callout { title: "T".into(), body: "B".into() },
            ContentBlock::Formula("x = y".into()),
        ];
        let lines = render_blocks(&blocks);
        assert!(lines.contains(&"# H".to_string()));
        assert!(lines.contains(&"P".to_string()));
        assert!(lines.contains(&"  • a".to_string()));
        assert!(lines.contains(&"[T]".to_string()));
        assert!(lines.contains(&"    x = y".to_string()));
    }

    #[test]
    fn guides_exist_in_both_languages() {
        for locale in [Locale::Es, Locale::En] {
            assert!(!swiss_pairing_guide(locale).is_empty());
            assert!(!elo_rating_guide(locale).is_empty());
        }
    }
}
