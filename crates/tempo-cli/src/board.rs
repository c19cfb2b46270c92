//! ASCII board rendering from the piece-placement field of a FEN.

/// Render a FEN as an 8x8 ASCII diagram, white at the bottom.
///
/// Only the piece-placement field is read; empty squares print as `.`.
#[must_use]
pub fn render(fen: &str) -> String {
    let placement = fen.split_whitespace().next().unwrap_or(fen);
    let mut out = String::new();
    for (i, rank) in placement.split('/').take(8).enumerate() {
        out.push_str(&(8 - i).to_string());
        for c in rank.chars() {
            if let Some(n) = c.to_digit(10) {
                for _ in 0..n {
                    out.push_str(" .");
                }
            } else {
                out.push(' ');
                out.push(c);
            }
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

#[cfg(test)]
mod tests {
    use super::render;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_starting_position() {
        let diagram = render(tempo_core::STARTING_FEN);
        let expected = "\
8 r n b q k b n r
7 p p p p p p p p
6 . . . . . . . .
5 . . . . . . . .
4 . . . . . . . .
3 . . . . . . . .
2 P P P P P P P P
1 R N B Q K B N R
  a b c d e f g h";
        assert_eq!(diagram, expected);
    }

    #[test]
    fn expands_mixed_rank_digits() {
        let diagram = render("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
        assert!(diagram.contains("5 . . . . p . . ."));
        assert!(diagram.contains("4 . . . . P . . ."));
        assert!(diagram.contains("7 p p p p . p p p"));
    }
}
