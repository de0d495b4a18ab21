use super::Generator;

/// Reveals text left to right, one column per frame, on every line at once.
///
/// For text whose longest line is `W` characters this yields `W - 1` frames;
/// frame `i` shows the first `i` characters of each line padded with spaces
/// to `W`. The fully revealed text is not part of the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildUpText;

impl Generator for BuildUpText {
    fn generate(&self, text: &str) -> Vec<String> {
        let lines: Vec<Vec<char>> = text.split('\n').map(|l| l.chars().collect()).collect();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);

        (1..width)
            .map(|i| {
                lines
                    .iter()
                    .map(|line| {
                        let mut out: String = line.iter().take(i).collect();
                        out.extend(std::iter::repeat(' ').take(width - i));
                        out
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect()
    }
}
