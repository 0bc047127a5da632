//! Static copy for the informational pages.

pub struct Section {
    pub heading: &'static str,
    pub body: &'static str,
}

pub const SEARCH_HEADLINE: &str = "Discover the Unseen.";
pub const SEARCH_TAGLINE: &str =
    "Neural ranking across technology stacks and product catalogs.";
pub const QUERY_PLACEHOLDER: &str = "Ask about Distributed Systems or Mechanical Keyboards...";

pub const LOW_CONFIDENCE_BANNER: &str = "Low Confidence Signal: some results might not match closely. \
     Try more specific keywords or adjust the filters.";

pub const NO_RESULTS_TITLE: &str = "No Matching Vectors";
pub const NO_RESULTS_HINT: &str = "No result cleared the relevance floor. Broaden the query or \
     widen the filters to All Domains.";

pub const IDLE_HINT: &str = "Type a query and press Enter, or pick a suggestion.";
pub const SEARCHING: &str = "Searching...";

pub const HOW_IT_WORKS_TITLE: &str = "Beyond Keywords.";
pub const HOW_IT_WORKS_INTRO: &str = "IntelliRank weighs the terms of a query to rank documents by \
     meaning rather than by matching characters.";
pub const HOW_IT_WORKS_STEPS: [Section; 4] = [
    Section {
        heading: "01  Lexical Normalization",
        body: "Noise is stripped from the query: stopwords go, and the tokens that carry intent \
               are kept.",
    },
    Section {
        heading: "02  TF-IDF Vectorization",
        body: "Every document becomes a weighted vector. Rare terms weigh more, so distinctive \
               signals stand out.",
    },
    Section {
        heading: "03  Cosine Similarity Ranking",
        body: "Documents are ordered by the angle between their vector and the query's.",
    },
    Section {
        heading: "Why no results?",
        body: "The engine enforces a relevance floor. When even the best match falls below it, \
               nothing is shown.",
    },
];
pub const START_SEARCH: &str = "Start Search";

pub const PRIVACY_TITLE: &str = "Private by Design.";
pub const PRIVACY_INTRO: &str = "A search environment built on anonymity, not surveillance.";
pub const PRIVACY_SECTIONS: [Section; 4] = [
    Section {
        heading: "Volatile Memory",
        body: "Queries live in memory only for as long as retrieval takes and are never written \
               to disk.",
    },
    Section {
        heading: "Zero Tracking",
        body: "No cookies, session identifiers or IP logging.",
    },
    Section {
        heading: "Stateless API",
        body: "There are no user accounts and no server-side session state.",
    },
    Section {
        heading: "No Persistence",
        body: "Searching never touches a database; the dataset is loaded into memory at boot.",
    },
];
