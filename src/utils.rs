use crate::population::Population;

/// Logs at info level, stripping ANSI colour codes when colours are disabled
#[macro_export]
macro_rules! cinfo {
    ($colorful:expr, $($arg:tt)+) => {{
        if $colorful {
            log::info!($($arg)+);
        } else {
            log::info!("{}", $crate::utils::strip_ansi(&format!($($arg)+)));
        }
    }};
}

/// Removes `ESC [ ... m` colour sequences from a string
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            for code in chars.by_ref() {
                if code == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub fn display_generation_legend() -> String {
    "\x1b[2;97mgeneration | best genome (x) | best fitness | average fitness | selectable\x1b[0m".to_string()
}

/// One summary line for an evaluated generation
pub fn display_generation(pop: &Population, generation: usize) -> String {
    match pop.fittest() {
        Some(best) => format!(
            "#{:<5} | {} ({:>2}) | \x1b[1;92m{:>8.3}\x1b[0m | {:>9.3} | {}/{}",
            generation,
            best.bit_string(),
            best.value(),
            best.fitness,
            pop.average_fitness(),
            pop.selectable_count(),
            pop.len()
        ),
        None => format!("#{:<5} | empty population", generation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_removes_color_codes() {
        assert_eq!(strip_ansi("\x1b[1;92mbest\x1b[0m 12"), "best 12");
        assert_eq!(strip_ansi("plain text"), "plain text");
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn test_display_generation_mentions_best_individual() {
        let pop = Population::test_from_values(&[8, 3, 1]);
        let line = strip_ansi(&display_generation(&pop, 4));
        assert!(line.starts_with("#4"));
        assert!(line.contains("00011 ( 3)"));
        assert!(line.contains("12.000"));
        assert!(line.ends_with("2/3"));
    }

    #[test]
    fn test_display_generation_of_empty_population() {
        assert_eq!(display_generation(&Population::new(), 0), "#0     | empty population");
    }
}
