//! Read-side introspection of an ACL's RDF state

use std::collections::HashSet;

use oxrdf::{Graph, NamedNode, SubjectRef, TermRef};
use oxttl::TurtleParser;

use crate::error::{AclError, AclResult};
use crate::permission::Permission;
use crate::vocab;

/// Parse a Turtle response body into a graph
pub(crate) fn parse_graph(body: &str) -> AclResult<Graph> {
    let mut graph = Graph::new();
    for triple in TurtleParser::new().for_reader(body.as_bytes()) {
        graph.insert(&triple?);
    }
    Ok(graph)
}

/// An ACL's RDF state, parsed once from a fetch with children embedded
///
/// Read-only; independent instances are safe to use concurrently.
pub struct AclGraph {
    graph: Graph,
}

impl AclGraph {
    pub fn parse(body: &str) -> AclResult<Self> {
        Ok(Self {
            graph: parse_graph(body)?,
        })
    }

    /// Permissions currently granted to `role`
    ///
    /// Unions modes across all authorizations naming the role, so a
    /// malformed ACL with duplicate authorizations still reads correctly.
    pub fn permissions_for_role(&self, role: &str) -> AclResult<HashSet<Permission>> {
        let role = NamedNode::new(role)?;
        let mut permissions = HashSet::new();

        for authz in self
            .graph
            .subjects_for_predicate_object(vocab::AGENT, role.as_ref())
        {
            for mode in self.graph.objects_for_subject_predicate(authz, vocab::MODE) {
                if mode == TermRef::from(vocab::READ) {
                    permissions.insert(Permission::Read);
                } else if mode == TermRef::from(vocab::WRITE) {
                    permissions.insert(Permission::Write);
                }
            }
        }

        Ok(permissions)
    }

    /// The single authorization naming `role` as agent, if any
    ///
    /// More than one is a consistency error; none is `Ok(None)`.
    pub fn authorization_for_role(&self, role: &str) -> AclResult<Option<String>> {
        let node = NamedNode::new(role)?;
        let mut authorizations: Vec<String> = self
            .graph
            .subjects_for_predicate_object(vocab::AGENT, node.as_ref())
            .filter_map(|s| match s {
                SubjectRef::NamedNode(n) => Some(n.as_str().to_string()),
                _ => None,
            })
            .collect();

        match authorizations.len() {
            0 => Ok(None),
            1 => Ok(authorizations.pop()),
            _ => Err(AclError::MultipleAuthorizations {
                role: role.to_string(),
            }),
        }
    }

    /// All distinct agents across all authorizations
    pub fn roles_with_any_grant(&self) -> HashSet<String> {
        self.graph
            .iter()
            .filter(|t| t.predicate == vocab::AGENT)
            .filter_map(|t| match t.object {
                TermRef::NamedNode(n) => Some(n.as_str().to_string()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACL: &str = "http://repo.local/rest/acls/a1";
    const ALICE: &str = "http://repo.local/rest/users/alice";
    const BOB: &str = "http://repo.local/rest/users/bob";

    fn authz(permission: Permission, agents: &[&str]) -> String {
        let uri = crate::permission::authorization_uri(ACL, permission);
        let mut body = String::new();
        for agent in agents {
            body.push_str(&format!("<{uri}> <{}> <{agent}> .\n", vocab::AGENT.as_str()));
        }
        for mode in permission.modes() {
            body.push_str(&format!(
                "<{uri}> <{}> <{}> .\n",
                vocab::MODE.as_str(),
                mode.as_str()
            ));
        }
        body
    }

    #[test]
    fn test_permissions_for_role() {
        let body = format!("{}{}", authz(Permission::Read, &[ALICE]), authz(Permission::Write, &[BOB]));
        let acl = AclGraph::parse(&body).unwrap();

        let alice = acl.permissions_for_role(ALICE).unwrap();
        assert_eq!(alice, HashSet::from([Permission::Read]));

        let bob = acl.permissions_for_role(BOB).unwrap();
        assert_eq!(bob, HashSet::from([Permission::Read, Permission::Write]));

        assert!(acl.permissions_for_role("http://nobody.local/x").unwrap().is_empty());
    }

    #[test]
    fn test_authorization_for_role() {
        let body = authz(Permission::Read, &[ALICE]);
        let acl = AclGraph::parse(&body).unwrap();

        assert_eq!(
            acl.authorization_for_role(ALICE).unwrap(),
            Some(crate::permission::authorization_uri(ACL, Permission::Read))
        );
        assert_eq!(acl.authorization_for_role(BOB).unwrap(), None);
    }

    #[test]
    fn test_duplicate_authorizations_are_an_error() {
        let body = format!("{}{}", authz(Permission::Read, &[ALICE]), authz(Permission::Write, &[ALICE]));
        let acl = AclGraph::parse(&body).unwrap();

        // Union path tolerates the duplicate
        let permissions = acl.permissions_for_role(ALICE).unwrap();
        assert_eq!(permissions, HashSet::from([Permission::Read, Permission::Write]));

        // Single-resource lookup does not
        assert!(matches!(
            acl.authorization_for_role(ALICE),
            Err(AclError::MultipleAuthorizations { .. })
        ));
    }

    #[test]
    fn test_roles_with_any_grant() {
        let body = format!("{}{}", authz(Permission::Read, &[ALICE]), authz(Permission::Write, &[BOB]));
        let acl = AclGraph::parse(&body).unwrap();

        let roles = acl.roles_with_any_grant();
        assert_eq!(roles, HashSet::from([ALICE.to_string(), BOB.to_string()]));
    }
}
