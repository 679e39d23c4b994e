use serde::Serialize;

/// A camp offering. The catalog is static: camps are few and change with a
/// deploy, not at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct Camp {
    pub slug: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub opens: &'static str,
    pub closes: &'static str,
    pub requires_email: bool,
    pub questions: &'static [&'static str],
}

pub const CAMPS: &[Camp] = &[
    Camp {
        slug: "creative-camp-2025",
        name: "Creative Camp 2025",
        tagline: "A space for high schoolers to express themselves through art, \
                  speech, and storytelling.",
        opens: "2025-04-20",
        closes: "2025-06-03",
        requires_email: true,
        questions: &[
            "Why do you want to join this camp?",
            "Tell us about a creative project you are proud of.",
            "What do you hope to take home from the camp?",
        ],
    },
    Camp {
        slug: "web-camp-2025",
        name: "Web Camp 2025",
        tagline: "A hands-on week of building and shipping websites with mentors \
                  from the industry.",
        opens: "2025-10-01",
        closes: "2025-12-01",
        requires_email: false,
        questions: &[
            "Have you built anything for the web before? Tell us about it.",
            "What would you like to build by the end of the week?",
        ],
    },
];

pub fn find(slug: &str) -> Option<&'static Camp> {
    CAMPS.iter().find(|camp| camp.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_resolves_known_slugs() {
        assert_eq!(find("creative-camp-2025").unwrap().questions.len(), 3);
        assert!(find("no-such-camp").is_none());
    }
}
