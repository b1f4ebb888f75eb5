//! Tag membership cross-reference
//!
//! Membership lives on the tag, so attaching tags to users or systems means
//! inverting every tag's member list. The inversion is built once per call
//! and preserves the order tags were fetched in.

use super::Tag;
use std::collections::HashMap;

/// A record that can appear in a tag's member list
pub trait Taggable {
    /// Id as it appears in the tag's member list
    fn member_id(&self) -> &str;

    /// The member list of `tag` that applies to this record type
    fn members(tag: &Tag) -> &[String];

    /// Replace the enriched tag list
    fn set_tags(&mut self, tags: Vec<Tag>);
}

/// Map each member id to the positions of the tags that contain it
fn member_index<T: Taggable>(tags: &[Tag]) -> HashMap<&str, Vec<usize>> {
    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (position, tag) in tags.iter().enumerate() {
        for member in T::members(tag) {
            let positions = index.entry(member.as_str()).or_default();
            // A tag listing the same member twice still attaches once.
            if positions.last() != Some(&position) {
                positions.push(position);
            }
        }
    }
    index
}

/// Attach to every record the tags that list it as a member.
///
/// Records without any tag get an empty list, so stale tags never survive.
pub fn attach_tags<T: Taggable>(records: &mut [T], tags: &[Tag]) {
    let index = member_index::<T>(tags);

    for record in records.iter_mut() {
        let attached: Vec<Tag> = index
            .get(record.member_id())
            .map(|positions| positions.iter().map(|&p| tags[p].clone()).collect())
            .unwrap_or_default();
        record.set_tags(attached);
    }
}
