use std::fmt::{Display, Write};

use proptest::prelude::*;

use crate::{interval::Interval, node::Node};

const BOUND_MAX: usize = 20;

/// Shorthand for a valid [`Interval`] in tests.
pub(crate) fn iv(low: usize, high: usize) -> Interval<usize> {
    Interval::new(low, high).unwrap()
}

/// Generate arbitrary valid intervals with bounds from [0..[`BOUND_MAX`]).
///
/// A small bound domain encourages multiple operations to act on the same
/// interval, and many intervals to overlap.
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<usize>> {
    (0..BOUND_MAX, 0..BOUND_MAX).prop_map(|(a, b)| iv(a.min(b), a.max(b)))
}

/// Render the subtree rooted at `n` as a graphviz digraph, for debugging test
/// failures.
#[allow(unused)]
pub(crate) fn print_dot<T, V>(n: &Node<T, V>) -> String
where
    V: Display,
    T: Display + Ord,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, r#"bgcolor = "transparent";"#).unwrap();
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )
    .unwrap();
    recurse(n, &mut buf);
    writeln!(buf, "}}").unwrap();

    buf
}

fn recurse<T, V, W>(n: &Node<T, V>, buf: &mut W)
where
    W: std::fmt::Write,
    V: Display,
    T: Display + Ord,
{
    writeln!(
        buf,
        r#""{}" [label="{} | {} | {{ max={} | n={} }}"];"#,
        n.interval(),
        n.interval(),
        n.label(),
        n.max_high(),
        n.size(),
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    n.interval(),
                    v.interval()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", n.interval()).unwrap();
                writeln!(
                    buf,
                    "\"{}\" -> \"null_{}\" [style=invis];",
                    n.interval(),
                    n.interval()
                )
                .unwrap();
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_dot() {
        let mut root = None;
        for v in [3, 1, 5] {
            let _ = crate::node::insert_at_root(&mut root, iv(v, v + 1), v);
        }

        let got = print_dot(root.as_deref().unwrap());

        assert!(got.starts_with("digraph {"));
        assert!(got.contains(r#""[5, 6]" [label="[5, 6] | 5 | { max=6 | n=3 }"];"#));
        assert!(got.contains(r#""[5, 6]" -> "[1, 2]""#));
        assert!(got.contains(r#""[1, 2]" -> "[3, 4]""#));
        assert!(got.trim_end().ends_with('}'));
    }
}
