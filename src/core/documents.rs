//! Documents compiled into the binary: read-only tutorials and the sample
//! texts offered by the debug-mode chooser.

/// A bundled text with the name shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledDocument {
    pub name: &'static str,
    pub text: &'static str,
}

const TUTORIALS: &[BundledDocument] = &[
    BundledDocument {
        name: "1_basics",
        text: include_str!("../../assets/tutorial/1_basics.txt"),
    },
    BundledDocument {
        name: "2_inserting",
        text: include_str!("../../assets/tutorial/2_inserting.txt"),
    },
    BundledDocument {
        name: "3_selecting",
        text: include_str!("../../assets/tutorial/3_selecting.txt"),
    },
];

// sorted by name, like a directory listing
const SAMPLES: &[BundledDocument] = &[
    BundledDocument {
        name: "edges.txt",
        text: include_str!("../../assets/samples/edges.txt"),
    },
    BundledDocument {
        name: "long.txt",
        text: include_str!("../../assets/samples/long.txt"),
    },
    BundledDocument {
        name: "lorem.txt",
        text: include_str!("../../assets/samples/lorem.txt"),
    },
];

pub fn tutorial_count() -> usize {
    TUTORIALS.len()
}

/// Tutorial by 1-based index
pub fn tutorial(index: usize) -> Option<&'static BundledDocument> {
    index.checked_sub(1).and_then(|i| TUTORIALS.get(i))
}

pub fn samples() -> &'static [BundledDocument] {
    SAMPLES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutorials_are_one_based() {
        assert!(tutorial(0).is_none());
        assert_eq!(tutorial(1).map(|doc| doc.name), Some("1_basics"));
        assert!(tutorial(tutorial_count()).is_some());
        assert!(tutorial(tutorial_count() + 1).is_none());
    }

    #[test]
    fn test_samples_sorted_and_nonempty() {
        let names: Vec<_> = samples().iter().map(|doc| doc.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(samples().iter().all(|doc| !doc.text.is_empty()));
    }
}
