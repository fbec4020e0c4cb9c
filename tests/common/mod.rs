//! Shared fixtures: an in-process resource server and a small RDF codec.
#![allow(dead_code)]

use async_trait::async_trait;
use http::Method;
use parking_lot::Mutex;
use source_editor::editor::{EditorConfig, MemorySurface, RenderSurface, SourceEditor};
use source_editor::store::{vocab, Graph, Term};
use source_editor::{RdfCodec, Result, SessionContext, SyntaxError, Transport, WebRequest, WebResponse};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

// ========== Mock server ==========

#[derive(Debug, Clone)]
pub struct Resource {
    pub body: String,
    pub content_type: Option<String>,
    pub allow: Option<String>,
    pub version: u64,
}

impl Resource {
    pub fn etag(&self) -> String {
        format!("\"E{}\"", self.version)
    }

    fn headers(&self, response: WebResponse) -> WebResponse {
        let mut response = response.with_header("etag", self.etag());
        if let Some(ct) = &self.content_type {
            response = response.with_header("content-type", ct.as_str());
        }
        if let Some(allow) = &self.allow {
            response = response.with_header("allow", allow.as_str());
        }
        response
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub uri: String,
    pub request: WebRequest,
}

/// A [`Transport`] serving resources from memory with ETag / If-Match semantics.
///
/// Every request is recorded.
#[derive(Default)]
pub struct MockServer {
    resources: Mutex<HashMap<String, Resource>>,
    requests: Mutex<Vec<Recorded>>,
    fail_head: Mutex<bool>,
}

impl MockServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn serve(&self, uri: &str, body: &str, content_type: Option<&str>) {
        self.resources.lock().insert(
            uri.to_string(),
            Resource {
                body: body.to_string(),
                content_type: content_type.map(str::to_string),
                allow: None,
                version: 1,
            },
        );
    }

    pub fn set_allow(&self, uri: &str, allow: &str) {
        if let Some(resource) = self.resources.lock().get_mut(uri) {
            resource.allow = Some(allow.to_string());
        }
    }

    /// Simulate another writer changing the resource.
    pub fn touch(&self, uri: &str) {
        if let Some(resource) = self.resources.lock().get_mut(uri) {
            resource.body.push_str("\n# changed elsewhere\n");
            resource.version += 1;
        }
    }

    pub fn fail_head(&self, fail: bool) {
        *self.fail_head.lock() = fail;
    }

    pub fn resource(&self, uri: &str) -> Option<Resource> {
        self.resources.lock().get(uri).cloned()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn methods(&self) -> Vec<Method> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.request.method.clone())
            .collect()
    }

    pub fn puts(&self) -> Vec<WebRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.request.method == Method::PUT)
            .map(|r| r.request.clone())
            .collect()
    }

    fn respond(&self, uri: &str, request: &WebRequest) -> WebResponse {
        let mut resources = self.resources.lock();
        match request.method {
            Method::GET => match resources.get(uri) {
                Some(resource) => resource.headers(WebResponse::new(200, resource.body.clone())),
                None => WebResponse::new(404, "Not Found"),
            },
            Method::HEAD => {
                if *self.fail_head.lock() {
                    return WebResponse::empty(500);
                }
                match resources.get(uri) {
                    Some(resource) => resource.headers(WebResponse::empty(200)),
                    None => WebResponse::empty(404),
                }
            }
            Method::PUT => {
                let current = resources.get(uri).map(Resource::etag);
                if let Some(tag) = request.if_match() {
                    if current.as_deref() != Some(tag) {
                        return WebResponse::empty(412);
                    }
                }
                let body = request.body_str().unwrap_or_default().to_string();
                let status = if current.is_some() { 204 } else { 201 };
                let resource = resources.entry(uri.to_string()).or_insert(Resource {
                    body: String::new(),
                    content_type: None,
                    allow: None,
                    version: 0,
                });
                resource.body = body;
                resource.version += 1;
                if request.content_type.is_some() {
                    resource.content_type = request.content_type.clone();
                }
                WebResponse::empty(status)
            }
            _ => WebResponse::empty(405),
        }
    }
}

#[async_trait]
impl Transport for MockServer {
    async fn web_operation(&self, uri: &str, request: WebRequest) -> Result<WebResponse> {
        let response = self.respond(uri, &request);
        self.requests.lock().push(Recorded {
            uri: uri.to_string(),
            request,
        });
        Ok(response)
    }
}

// ========== Toy codec ==========

/// Line-oriented Turtle subset and a flat JSON-LD subset.
///
/// Turtle: one `<s> <p> <o> .` statement per line, `a` for `rdf:type`,
/// double-quoted literals without escapes, `#` comments.
///
/// JSON-LD: an object or array of objects; `@id` must be absolute, empty or a
/// fragment, otherwise the node becomes blank. Keys must be absolute IRIs.
#[derive(Debug, Default)]
pub struct ToyCodec;

impl ToyCodec {
    pub fn shared() -> Arc<dyn RdfCodec> {
        Arc::new(ToyCodec)
    }
}

#[async_trait]
impl RdfCodec for ToyCodec {
    fn parse(
        &self,
        text: &str,
        graph: &mut Graph,
        base_uri: &str,
        content_type: &str,
    ) -> std::result::Result<(), SyntaxError> {
        let mut parsed = Graph::new();
        match content_type {
            "application/ld+json" => parse_json_ld(text, &mut parsed, base_uri)?,
            "text/turtle" | "text/n3" => parse_turtle(text, &mut parsed, base_uri)?,
            "application/rdf+xml" if text.trim_start().starts_with('<') => {}
            other => {
                return Err(SyntaxError::new(format!("cannot parse {}", other)));
            }
        }
        graph.extend(parsed.iter().cloned());
        Ok(())
    }

    async fn serialize(
        &self,
        _subject: &str,
        graph: &Graph,
        base_uri: &str,
        content_type: &str,
    ) -> std::result::Result<String, SyntaxError> {
        let mut sorted = graph.clone();
        sorted.sort();
        match content_type {
            "application/ld+json" => Ok(serialize_json_ld(&sorted)),
            "text/turtle" | "text/n3" => Ok(serialize_turtle(&sorted, base_uri)),
            other => Err(SyntaxError::new(format!("cannot serialize {}", other))),
        }
    }
}

fn resolve(base: &str, iri: &str) -> String {
    if iri.is_empty() {
        base.to_string()
    } else if iri.starts_with('#') {
        let doc = base.split('#').next().unwrap_or(base);
        format!("{}{}", doc, iri)
    } else if iri.contains("://") {
        iri.to_string()
    } else {
        let dir = base.rfind('/').map_or(base, |i| &base[..=i]);
        format!("{}{}", dir, iri)
    }
}

enum LineError {
    At(usize, String),
    Unterminated,
}

fn parse_turtle(text: &str, graph: &mut Graph, base: &str) -> std::result::Result<(), SyntaxError> {
    for (n, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_statement(line, base) {
            Ok([s, p, o]) => {
                graph.add(s, p, o, base);
            }
            Err(LineError::At(column, message)) => {
                return Err(SyntaxError::new(format!("Turtle parse error in <{}>", base))
                    .caused_by(SyntaxError::new(message).at_line(n).at_column(column)));
            }
            Err(LineError::Unterminated) => {
                return Err(SyntaxError::new(format!("Turtle parse error in <{}>", base))
                    .caused_by(SyntaxError::new("expected '.'").at_line(n).before_line()));
            }
        }
    }
    Ok(())
}

fn parse_statement(line: &str, base: &str) -> std::result::Result<[Term; 3], LineError> {
    let bytes = line.as_bytes();
    let mut terms: Vec<Term> = Vec::new();
    let mut i = 0;
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return Err(LineError::Unterminated);
        }
        match bytes[i] {
            b'.' if terms.len() == 3 => {
                let rest = line[i + 1..].trim();
                if !rest.is_empty() && !rest.starts_with('#') {
                    return Err(LineError::At(i + 1, "unexpected text after '.'".into()));
                }
                let mut it = terms.into_iter();
                return match (it.next(), it.next(), it.next()) {
                    (Some(s), Some(p), Some(o)) => Ok([s, p, o]),
                    _ => Err(LineError::At(i, "incomplete statement".into())),
                };
            }
            _ if terms.len() == 3 => {
                return Err(LineError::At(i, "expected '.'".into()));
            }
            b'<' => {
                let end = line[i + 1..]
                    .find('>')
                    .ok_or_else(|| LineError::At(i, "unterminated IRI".into()))?;
                terms.push(Term::named(resolve(base, &line[i + 1..i + 1 + end])));
                i += end + 2;
            }
            b'"' if terms.len() == 2 => {
                let end = line[i + 1..]
                    .find('"')
                    .ok_or_else(|| LineError::At(i, "unterminated literal".into()))?;
                terms.push(Term::literal(&line[i + 1..i + 1 + end]));
                i += end + 2;
            }
            b'a' if terms.len() == 1
                && bytes.get(i + 1).map_or(false, |b| b.is_ascii_whitespace()) =>
            {
                terms.push(Term::named(vocab::RDF_TYPE));
                i += 1;
            }
            other => {
                return Err(LineError::At(i, format!("unexpected '{}'", other as char)));
            }
        }
    }
}

fn turtle_term(term: &Term, base: &str) -> String {
    match term {
        Term::NamedNode(iri) if iri == vocab::RDF_TYPE => "a".to_string(),
        Term::NamedNode(iri) if iri == base => "<>".to_string(),
        Term::NamedNode(iri) => match iri.strip_prefix(base) {
            Some(fragment) if fragment.starts_with('#') => format!("<{}>", fragment),
            _ => format!("<{}>", iri),
        },
        Term::BlankNode(id) => format!("_:{}", id),
        Term::Literal { value, .. } => format!("\"{}\"", value),
    }
}

fn serialize_turtle(graph: &Graph, base: &str) -> String {
    graph
        .iter()
        .map(|st| {
            format!(
                "{} {} {} .\n",
                turtle_term(&st.subject, base),
                turtle_term(&st.predicate, base),
                turtle_term(&st.object, base)
            )
        })
        .collect()
}

fn parse_json_ld(text: &str, graph: &mut Graph, base: &str) -> std::result::Result<(), SyntaxError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| SyntaxError::new("JSON-LD parse error").caused_by(SyntaxError::from(e)))?;
    let nodes = match value {
        serde_json::Value::Array(nodes) => nodes,
        node @ serde_json::Value::Object(_) => vec![node],
        _ => return Err(SyntaxError::new("JSON-LD document must be an object or array")),
    };

    for (index, node) in nodes.iter().enumerate() {
        let Some(object) = node.as_object() else {
            return Err(SyntaxError::new("JSON-LD node must be an object"));
        };
        let subject = match object.get("@id").and_then(|v| v.as_str()) {
            Some(id) if expandable(id) => Term::named(resolve(base, id)),
            _ => Term::blank(format!("b{}", index)),
        };
        for (key, value) in object {
            let predicate = match key.as_str() {
                "@id" => continue,
                "@type" => Term::named(vocab::RDF_TYPE),
                iri if iri.contains("://") => Term::named(iri),
                _ => continue,
            };
            let values = match value {
                serde_json::Value::Array(items) => items.clone(),
                single => vec![single.clone()],
            };
            for item in values {
                let term = match &item {
                    serde_json::Value::String(s) if key == "@type" => Term::named(resolve(base, s)),
                    serde_json::Value::String(s) => Term::literal(s.as_str()),
                    serde_json::Value::Object(o) => match o.get("@id").and_then(|v| v.as_str()) {
                        Some(id) if expandable(id) => Term::named(resolve(base, id)),
                        _ => continue,
                    },
                    other => Term::literal(other.to_string()),
                };
                graph.add(subject.clone(), predicate.clone(), term, base);
            }
        }
    }
    Ok(())
}

fn expandable(id: &str) -> bool {
    id.is_empty() || id.starts_with('#') || id.contains("://")
}

fn serialize_json_ld(graph: &Graph) -> String {
    let mut nodes: BTreeMap<&Term, serde_json::Map<String, serde_json::Value>> = BTreeMap::new();
    for st in graph.iter() {
        let node = nodes.entry(&st.subject).or_insert_with(|| {
            let mut node = serde_json::Map::new();
            if let Term::NamedNode(iri) = &st.subject {
                node.insert("@id".into(), serde_json::Value::String(iri.clone()));
            }
            node
        });
        let (key, value) = if st.predicate.value() == vocab::RDF_TYPE {
            ("@type".to_string(), serde_json::Value::String(st.object.value().to_string()))
        } else {
            let value = match &st.object {
                Term::NamedNode(iri) => serde_json::json!({ "@id": iri }),
                other => serde_json::Value::String(other.value().to_string()),
            };
            (st.predicate.value().to_string(), value)
        };
        match node.get_mut(&key) {
            Some(serde_json::Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = serde_json::Value::Array(vec![first, value]);
            }
            None => {
                node.insert(key, value);
            }
        }
    }
    let array = nodes
        .into_values()
        .map(serde_json::Value::Object)
        .collect::<Vec<_>>();
    serde_json::to_string_pretty(&serde_json::Value::Array(array)).unwrap_or_default()
}

// ========== Editor fixture ==========

pub fn open_editor(
    server: &Arc<MockServer>,
    uri: &str,
    session: SessionContext,
) -> SourceEditor<MemorySurface> {
    SourceEditor::new(
        uri,
        MemorySurface::new(),
        server.clone(),
        ToyCodec::shared(),
        session,
        EditorConfig::default(),
    )
    .expect("valid editor")
}

/// Type `text` into the editor's text area the way a user would.
pub async fn type_text(editor: &mut SourceEditor<MemorySurface>, text: &str) {
    let text_area = editor.elements().text_area;
    editor.surface_mut().set_value(text_area, text);
    editor
        .handle_event(source_editor::EditorEvent::KeyUp)
        .await
        .expect("keystroke");
}
