//! Submission lifecycle state

use oxrdf::{Graph, NamedNode, TermRef};
use oxttl::TurtleParser;

use crate::error::{PolicyError, PolicyResult};
use crate::vocab;

/// Structured lifecycle status of a submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionStatus {
    Draft,
    ManuscriptRequired,
    ApprovalRequested,
    ChangesRequested,
    Submitted,
    Complete,
    Cancelled,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::ManuscriptRequired => "manuscript-required",
            SubmissionStatus::ApprovalRequested => "approval-requested",
            SubmissionStatus::ChangesRequested => "changes-requested",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Complete => "complete",
            SubmissionStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(SubmissionStatus::Draft),
            "manuscript-required" => Some(SubmissionStatus::ManuscriptRequired),
            "approval-requested" => Some(SubmissionStatus::ApprovalRequested),
            "changes-requested" => Some(SubmissionStatus::ChangesRequested),
            "submitted" => Some(SubmissionStatus::Submitted),
            "complete" => Some(SubmissionStatus::Complete),
            "cancelled" => Some(SubmissionStatus::Cancelled),
            _ => None,
        }
    }

    /// IRI of this status value
    pub fn iri(&self) -> String {
        format!("{}{}", vocab::STATUS_NS, self.as_str())
    }

    /// Whether the submission has passed the point of submission
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmissionStatus::Submitted | SubmissionStatus::Complete)
    }
}

/// A submission's access-relevant fields, parsed from its RDF body
#[derive(Clone, Debug)]
pub struct Submission {
    pub uri: String,
    pub cancelled: bool,
    /// Legacy flag, consulted only when `status` is absent
    pub submitted: Option<bool>,
    pub status: Option<SubmissionStatus>,
    pub submitter: Option<String>,
    pub preparers: Vec<String>,
}

impl Submission {
    pub fn parse(uri: &str, body: &str) -> PolicyResult<Self> {
        let mut graph = Graph::new();
        for triple in TurtleParser::new().for_reader(body.as_bytes()) {
            graph.insert(&triple?);
        }
        let subject = NamedNode::new(uri)?;

        let status = match graph
            .objects_for_subject_predicate(&subject, vocab::SUBMISSION_STATUS)
            .next()
        {
            None => None,
            Some(term) => Some(parse_status(term)?),
        };

        let mut preparers: Vec<String> = graph
            .objects_for_subject_predicate(&subject, vocab::PREPARER)
            .filter_map(named)
            .collect();
        preparers.sort();

        let submitter = graph
            .objects_for_subject_predicate(&subject, vocab::SUBMITTER)
            .find_map(named);

        Ok(Self {
            uri: uri.to_string(),
            cancelled: boolean(&graph, &subject, vocab::CANCELLED).unwrap_or(false),
            submitted: boolean(&graph, &subject, vocab::SUBMITTED),
            status,
            submitter,
            preparers,
        })
    }

    /// FROZEN once cancelled or submitted; only the backend may write
    ///
    /// The structured status wins over the legacy flag; with neither set
    /// the submission counts as not yet submitted.
    pub fn is_frozen(&self) -> bool {
        if self.cancelled || self.status == Some(SubmissionStatus::Cancelled) {
            return true;
        }
        match (self.status, self.submitted) {
            (Some(status), _) => status.is_submitted(),
            (None, Some(flag)) => flag,
            (None, None) => false,
        }
    }
}

fn parse_status(term: TermRef<'_>) -> PolicyResult<SubmissionStatus> {
    let name = match term {
        TermRef::NamedNode(n) => n.as_str().strip_prefix(vocab::STATUS_NS).unwrap_or(n.as_str()),
        TermRef::Literal(l) => l.value(),
        _ => "",
    };

    SubmissionStatus::parse(name).ok_or_else(|| PolicyError::UnknownStatus {
        status: term.to_string(),
    })
}

fn boolean(graph: &Graph, subject: &NamedNode, predicate: oxrdf::NamedNodeRef<'_>) -> Option<bool> {
    graph
        .objects_for_subject_predicate(subject, predicate)
        .find_map(|term| match term {
            TermRef::Literal(l) => match l.value() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        })
}

fn named(term: TermRef<'_>) -> Option<String> {
    match term {
        TermRef::NamedNode(n) => Some(n.as_str().to_string()),
        _ => None,
    }
}
