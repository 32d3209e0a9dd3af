use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Root,
    Key(&'a str),
    Index(usize),
}

/// Location of the node being converted, kept as a stack-allocated linked
/// list and only rendered when an error or a trace needs it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Trail<'a> {
    segment: Segment<'a>,
    parent: Option<&'a Trail<'a>>,
}

impl Trail<'static> {
    pub(crate) const ROOT: Self = Trail {
        segment: Segment::Root,
        parent: None,
    };
}

impl<'a> Trail<'a> {
    #[inline]
    pub(crate) fn key<'b>(&'b self, key: &'b str) -> Trail<'b>
    where
        'a: 'b,
    {
        Trail {
            segment: Segment::Key(key),
            parent: Some(self),
        }
    }

    #[inline]
    pub(crate) fn index<'b>(&'b self, index: usize) -> Trail<'b>
    where
        'a: 'b,
    {
        Trail {
            segment: Segment::Index(index),
            parent: Some(self),
        }
    }

    /// Renders the trail as `$.key[0].other`.
    pub(crate) fn render(&self) -> String {
        let mut segments = Vec::new();
        let mut current = Some(self);
        while let Some(trail) = current {
            segments.push(trail.segment);
            current = trail.parent;
        }

        let mut out = String::new();
        for segment in segments.iter().rev() {
            // Writing to a `String` cannot fail.
            let _ = match segment {
                Segment::Root => out.write_str("$"),
                Segment::Key(key) => write!(out, ".{key}"),
                Segment::Index(index) => write!(out, "[{index}]"),
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::Trail;

    #[test]
    fn render() {
        let root = Trail::ROOT;
        assert_eq!(root.render(), "$");

        let b = root.key("b");
        let c = b.key("c");
        let two = c.index(2);
        assert_eq!(two.render(), "$.b.c[2]");
    }
}
