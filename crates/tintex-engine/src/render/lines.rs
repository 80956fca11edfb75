//! Per-line post-processing of formatted markup.

/// Which lines get a visible number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNumbering {
    pub enabled: bool,
    pub start: u32,
    pub step: u32,
}

impl Default for LineNumbering {
    fn default() -> Self {
        Self {
            enabled: false,
            start: 1,
            step: 1,
        }
    }
}

impl LineNumbering {
    /// Whether the line whose counter is `counter` shows its number.
    pub fn shows(&self, counter: u32) -> bool {
        self.enabled && counter >= self.start && (counter - self.start) % self.step.max(1) == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub number: Option<u32>,
    pub markup: String,
}

/// Final lines of a snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    pub lines: Vec<RenderedLine>,
}

impl RenderedBlock {
    /// Numbers attached to lines, in order.
    pub fn shown_numbers(&self) -> Vec<u32> {
        self.lines.iter().filter_map(|line| line.number).collect()
    }

    /// Line markup with `\NLN_get:n` number prefixes, ready for a template.
    pub fn numbered_markup(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| match line.number {
                Some(n) => format!("\\NLN_get:n {{lineno:}}{{{n}}}{}", line.markup),
                None => line.markup.clone(),
            })
            .collect()
    }
}

/// Make spaces survive typesetting and attach line numbers.
///
/// A leading space gets a `\vphantom{Xy}` in front of it so the line keeps
/// its height; every space then becomes a `~`. Lines whose counter would
/// pass `u32::MAX` are left unnumbered.
pub fn post_process<'a, I>(lines: I, numbering: LineNumbering) -> RenderedBlock
where
    I: IntoIterator<Item = &'a str>,
{
    let lines = lines
        .into_iter()
        .zip(u64::from(numbering.start)..)
        .map(|(line, counter)| {
            let placeholder = if line.starts_with(' ') {
                r"\vphantom{Xy}"
            } else {
                ""
            };
            RenderedLine {
                number: u32::try_from(counter)
                    .ok()
                    .filter(|&n| numbering.shows(n)),
                markup: format!("{placeholder}{}", line.replace(' ', "~")),
            }
        })
        .collect();

    RenderedBlock { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn numbered(count: usize, start: u32, step: u32) -> Vec<u32> {
        let lines = vec!["x"; count];
        post_process(
            lines,
            LineNumbering {
                enabled: true,
                start,
                step,
            },
        )
        .shown_numbers()
    }

    #[test]
    fn every_line_numbered_by_default_step() {
        assert_eq!(numbered(4, 1, 1), vec![1, 2, 3, 4]);
    }

    #[rstest]
    #[case(6, vec![5, 8])]
    #[case(10, vec![5, 8, 11, 14])]
    #[case(1, vec![5])]
    fn start_and_step(#[case] count: usize, #[case] expected: Vec<u32>) {
        assert_eq!(numbered(count, 5, 3), expected);
    }

    #[test]
    fn counter_stops_at_largest_number() {
        assert_eq!(numbered(3, u32::MAX - 1, 1), vec![u32::MAX - 1, u32::MAX]);
        assert_eq!(numbered(1, u32::MAX, 1), vec![u32::MAX]);
    }

    #[test]
    fn zero_step_numbers_every_line() {
        assert_eq!(numbered(3, 1, 0), vec![1, 2, 3]);
    }

    #[test]
    fn disabled_numbering_shows_nothing() {
        let block = post_process(["a", "b"], LineNumbering::default());
        assert_eq!(block.shown_numbers(), Vec::<u32>::new());
        assert_eq!(block.lines.len(), 2);
    }

    #[test]
    fn spaces_are_tied() {
        let block = post_process(["\\PY{k}{int} x  = 1;", "  indented", ""], LineNumbering::default());
        let markup: Vec<&str> = block.lines.iter().map(|l| l.markup.as_str()).collect();
        assert_eq!(
            markup,
            vec![
                "\\PY{k}{int}~x~~=~1;",
                "\\vphantom{Xy}~~indented",
                "",
            ]
        );
    }

    #[test]
    fn numbered_markup_prefixes_shown_lines() {
        let block = post_process(
            ["a", "b", "c"],
            LineNumbering {
                enabled: true,
                start: 10,
                step: 2,
            },
        );
        assert_eq!(
            block.numbered_markup(),
            vec![
                "\\NLN_get:n {lineno:}{10}a".to_string(),
                "b".to_string(),
                "\\NLN_get:n {lineno:}{12}c".to_string(),
            ]
        );
    }
}
