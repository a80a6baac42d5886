use super::{Id, Kvlm};
use crate::{Error, FormatError, Result};

/// A commit: header fields (`tree`, `parent`, `author`, ...) and a message.
///
/// Links to the root tree and to parent commits are stored as IDs and are
/// only resolved when a caller reads them from a repository.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Commit {
    kvlm: Kvlm,
}

impl Commit {
    pub fn new(kvlm: Kvlm) -> Commit {
        Commit { kvlm }
    }

    pub fn parse(raw: &[u8]) -> Result<Commit> {
        Ok(Commit {
            kvlm: Kvlm::parse(raw)?,
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.kvlm.serialize()
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }

    pub fn kvlm_mut(&mut self) -> &mut Kvlm {
        &mut self.kvlm
    }

    /// Return the ID of the commit's root tree.
    pub fn tree(&self) -> Result<Id> {
        let tree = self.kvlm.get("tree").ok_or(FormatError::CommitWithoutTree)?;
        parse_id(tree)
    }

    /// Return the IDs of the commit's parents, in recorded order.
    pub fn parents(&self) -> Result<Vec<Id>> {
        self.kvlm
            .get_all("parent")
            .iter()
            .map(|p| parse_id(p))
            .collect()
    }

    pub fn message(&self) -> &[u8] {
        self.kvlm.message()
    }
}

fn parse_id(hex: &[u8]) -> Result<Id> {
    Id::from_hex(hex).map_err(|err| Error::from(FormatError::from(err)))
}
