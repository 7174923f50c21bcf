use crate::compare::Comparator;
use crate::treap::persistent::Treap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

// Items are written in ascending order together with their priorities. With distinct priorities
// reading them back rebuilds a tree of the same shape.
#[derive(Serialize)]
#[serde(rename = "Entry")]
struct EntryRef<'a, T: 'a> {
    item: &'a T,
    priority: u32,
}

#[derive(Deserialize)]
struct Entry<T> {
    item: T,
    priority: u32,
}

impl<T, C> Serialize for Treap<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for node in self.nodes() {
            seq.serialize_element(&EntryRef {
                item: &node.item,
                priority: node.priority,
            })?;
        }
        seq.end()
    }
}

impl<'de, T, C> Deserialize<'de> for Treap<T, C>
where
    T: Deserialize<'de> + Clone,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<Entry<T>>::deserialize(deserializer)?;
        Ok(entries.into_iter().fold(Treap::default(), |treap, entry| {
            treap.upsert(entry.item, entry.priority)
        }))
    }
}
