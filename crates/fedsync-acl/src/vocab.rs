//! WebAC and LDP vocabulary

use oxrdf::NamedNodeRef;

/// `acl:Authorization` class
pub const AUTHORIZATION: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Authorization");

/// Links an authorization to the resource it protects
pub const ACCESS_TO: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#accessTo");

/// Names a principal granted access
pub const AGENT: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#agent");

/// Access mode of an authorization
pub const MODE: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#mode");

/// `acl:Read` mode
pub const READ: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Read");

/// `acl:Write` mode
pub const WRITE: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Write");

/// Links a protected resource to its ACL
pub const ACCESS_CONTROL: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#accessControl");

/// Repository ACL resource class
pub const ACL_CLASS: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://fedora.info/definitions/v4/webac#Acl");

/// LDP containment link
pub const CONTAINS: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/ldp#contains");
