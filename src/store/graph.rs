//! In-memory statement store shared by the editing sessions of one host.
//!
//! Statements remember the document they were parsed from, so everything
//! read from one resource can be dropped without touching the others.

use std::collections::BTreeSet;
use std::fmt;

/// Vocabulary used by the store and the metadata fallback.
pub mod vocab {
    /// `rdf:type`
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// Namespace of request bookkeeping terms
    pub const LINK: &str = "http://www.w3.org/2007/ont/link#";
    /// `link:requestedURI`
    pub const LINK_REQUESTED_URI: &str = "http://www.w3.org/2007/ont/link#requestedURI";
    /// `link:response`
    pub const LINK_RESPONSE: &str = "http://www.w3.org/2007/ont/link#response";
    /// Namespace of HTTP response header terms
    pub const HTTPH: &str = "http://www.w3.org/2007/ont/httph#";

    /// Predicate recording response header `name`.
    pub fn httph(name: &str) -> String {
        format!("{}{}", HTTPH, name.to_ascii_lowercase())
    }
}

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    NamedNode(String),
    BlankNode(String),
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl Term {
    pub fn named(iri: impl Into<String>) -> Self {
        Term::NamedNode(iri.into())
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Term::BlankNode(id.into())
    }

    /// A plain string literal.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// IRI, blank node label or literal lexical form.
    pub fn value(&self) -> &str {
        match self {
            Term::NamedNode(v) | Term::BlankNode(v) => v,
            Term::Literal { value, .. } => value,
        }
    }

    #[inline]
    pub fn is_named_node(&self) -> bool {
        matches!(self, Term::NamedNode(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "_:{}", id),
            Term::Literal {
                value,
                datatype,
                language,
            } => {
                write!(f, "{:?}", value)?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = datatype {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// A triple together with the document it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Statement {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    /// URI of the document the statement was read from
    pub document: String,
}

impl Statement {
    pub fn new(subject: Term, predicate: Term, object: Term, document: impl Into<String>) -> Self {
        Statement {
            subject,
            predicate,
            object,
            document: document.into(),
        }
    }
}

/// Set of statements with per-document provenance.
///
/// Adding a statement that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    statements: Vec<Statement>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement. Returns `false` if it was already present.
    pub fn insert(&mut self, statement: Statement) -> bool {
        if self.statements.contains(&statement) {
            return false;
        }
        self.statements.push(statement);
        true
    }

    pub fn add(
        &mut self,
        subject: Term,
        predicate: Term,
        object: Term,
        document: impl Into<String>,
    ) -> bool {
        self.insert(Statement::new(subject, predicate, object, document))
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Statements matching a triple pattern; `None` is a wildcard.
    pub fn matching<'a>(
        &'a self,
        subject: Option<&'a Term>,
        predicate: Option<&'a Term>,
        object: Option<&'a Term>,
    ) -> impl Iterator<Item = &'a Statement> + 'a {
        self.statements.iter().filter(move |st| {
            subject.map_or(true, |s| &st.subject == s)
                && predicate.map_or(true, |p| &st.predicate == p)
                && object.map_or(true, |o| &st.object == o)
        })
    }

    /// Every subject `s` with a statement `s predicate object`.
    pub fn each_subject(&self, predicate: &Term, object: &Term) -> Vec<Term> {
        self.matching(None, Some(predicate), Some(object))
            .map(|st| st.subject.clone())
            .collect()
    }

    /// Some object `o` with a statement `subject predicate o`.
    pub fn any_object(&self, subject: &Term, predicate: &Term) -> Option<&Term> {
        self.statements
            .iter()
            .find(|st| &st.subject == subject && &st.predicate == predicate)
            .map(|st| &st.object)
    }

    /// Lexical value of [`Graph::any_object`].
    pub fn any_value(&self, subject: &Term, predicate: &Term) -> Option<&str> {
        self.any_object(subject, predicate).map(Term::value)
    }

    /// IRIs of every `rdf:type` of `subject`.
    pub fn find_type_uris(&self, subject: &Term) -> BTreeSet<String> {
        let rdf_type = Term::named(vocab::RDF_TYPE);
        self.matching(Some(subject), Some(&rdf_type), None)
            .filter(|st| st.object.is_named_node())
            .map(|st| st.object.value().to_string())
            .collect()
    }

    /// Number of statements read from `document`.
    pub fn document_len(&self, document: &str) -> usize {
        self.statements
            .iter()
            .filter(|st| st.document == document)
            .count()
    }

    /// Drop every statement read from `document`, leaving all others in place.
    ///
    /// Returns how many statements were removed.
    pub fn remove_document(&mut self, document: &str) -> usize {
        let before = self.statements.len();
        self.statements.retain(|st| st.document != document);
        before - self.statements.len()
    }

    /// Copy of the statements read from `document`.
    pub fn document(&self, document: &str) -> Graph {
        Graph {
            statements: self
                .statements
                .iter()
                .filter(|st| st.document == document)
                .cloned()
                .collect(),
        }
    }

    /// Sort statements for deterministic output.
    pub fn sort(&mut self) {
        self.statements.sort();
    }
}

impl Extend<Statement> for Graph {
    fn extend<I: IntoIterator<Item = Statement>>(&mut self, iter: I) {
        for statement in iter {
            self.insert(statement);
        }
    }
}
