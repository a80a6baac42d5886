//! Represents the git concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.

use sha1::{Digest, Sha1};

use crate::{codec, Result};

mod commit;
pub use commit::Commit;

pub mod envelope;

mod id;
pub use id::{Id, ParseIdError, ID_LEN};

mod kind;
pub use kind::Kind;

mod kvlm;
pub use kvlm::Kvlm;

mod tree;
pub use tree::{Tree, TreeEntry};

/// Opaque user data. A blob has no internal structure.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Blob {
    data: Vec<u8>,
}

impl Blob {
    pub fn new<D: Into<Vec<u8>>>(data: D) -> Blob {
        Blob { data: data.into() }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Describes a single object stored (or about to be stored) in a git repository.
///
/// Objects are immutable values. Changing one means building a new object,
/// which will have a new ID.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Object {
    Blob(Blob),
    Commit(Commit),
    Tree(Tree),
}

impl Object {
    /// Build an object of the given kind from its serialized payload.
    pub fn deserialize(kind: Kind, payload: &[u8]) -> Result<Object> {
        Ok(match kind {
            Kind::Blob => Object::Blob(Blob::new(payload)),
            Kind::Commit => Object::Commit(Commit::parse(payload)?),
            Kind::Tree => Object::Tree(Tree::parse(payload)?),
        })
    }

    /// Decode a full (uncompressed) envelope.
    pub fn decode(envelope: &[u8]) -> Result<Object> {
        let (kind, payload) = envelope::decode(envelope)?;
        Object::deserialize(kind, payload)
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        match self {
            Object::Blob(_) => Kind::Blob,
            Object::Commit(_) => Kind::Commit,
            Object::Tree(_) => Kind::Tree,
        }
    }

    /// Return the payload bytes (the envelope's contents).
    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Object::Blob(blob) => blob.data().to_vec(),
            Object::Commit(commit) => commit.serialize(),
            Object::Tree(tree) => tree.serialize(),
        }
    }

    /// Return the full envelope: `kind SP length NUL payload`.
    pub fn encode(&self) -> Vec<u8> {
        envelope::encode(self.kind(), &self.serialize())
    }

    /// Computes the object's ID from its content, size, and type.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn id(&self) -> Id {
        let payload = self.serialize();

        let mut hasher = Sha1::new();
        hasher.update(self.kind().tag());
        hasher.update(b" ");
        hasher.update(payload.len().to_string());
        hasher.update(b"\0");
        hasher.update(&payload);

        codec::finish(hasher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::FileMode;
    use crate::{Error, FormatError};

    #[test]
    fn blob_id_matches_command_line_git() {
        // $ echo 'test content' | git hash-object --stdin
        // d670460b4b4aece5915caf5c68d12f560a9fe3e4
        let o = Object::Blob(Blob::new("test content\n"));
        assert_eq!(o.kind(), Kind::Blob);
        assert_eq!(o.id().to_string(), "d670460b4b4aece5915caf5c68d12f560a9fe3e4");
        assert_eq!(o.id(), codec::digest(&o.encode()));
    }

    #[test]
    fn empty_tree_id_matches_command_line_git() {
        // $ git hash-object -t tree /dev/null
        let o = Object::Tree(Tree::new());
        assert_eq!(o.id().to_string(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
    }

    #[test]
    fn tree_id_matches_command_line_git() {
        // $ printf 'hi\n' | git hash-object -w --stdin
        // 45b983be36b73c0788dc9cbcb76cbb80fc7bb057
        // $ printf '100644 blob 45b983be36b73c0788dc9cbcb76cbb80fc7bb057\thello.txt\n' | git mktree
        // 7a2871192d49caaff5451df37b27afc373d8298b
        let blob = Object::Blob(Blob::new("hi\n"));
        assert_eq!(
            blob.id().to_string(),
            "45b983be36b73c0788dc9cbcb76cbb80fc7bb057"
        );

        let tree = Object::Tree(Tree::from_entries(vec![TreeEntry::new(
            FileMode::NORMAL,
            "hello.txt",
            blob.id(),
        )]));
        assert_eq!(
            tree.id().to_string(),
            "7a2871192d49caaff5451df37b27afc373d8298b"
        );
    }

    #[test]
    fn equal_content_equal_id() {
        let a = Object::Blob(Blob::new("same"));
        let b = Object::Blob(Blob::new("same"));
        let c = Object::Blob(Blob::new("different"));
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn same_payload_different_kind() {
        let blob = Object::deserialize(Kind::Blob, b"").unwrap();
        let tree = Object::deserialize(Kind::Tree, b"").unwrap();
        assert_ne!(blob.id(), tree.id());
    }

    #[test]
    fn decode_round_trip() {
        let commit = Object::deserialize(
            Kind::Commit,
            b"tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\ninitial\n",
        )
        .unwrap();

        let decoded = Object::decode(&commit.encode()).unwrap();
        assert_eq!(decoded, commit);
        assert_eq!(decoded.serialize(), commit.serialize());
    }

    #[test]
    fn deserialize_validates_structure() {
        match Object::deserialize(Kind::Tree, b"100644 truncated").unwrap_err() {
            Error::Format(FormatError::TruncatedTreeEntry) => (),
            err => panic!("wrong error: {:?}", err),
        }

        match Object::deserialize(Kind::Commit, b"no header terminator").unwrap_err() {
            Error::Format(FormatError::KvlmUnterminated) => (),
            err => panic!("wrong error: {:?}", err),
        }
    }
}
