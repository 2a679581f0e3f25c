//! Shared chat state: users, topic and map helpers.

mod dashmap_ext;
mod topic;
mod user;

pub use dashmap_ext::DashMapExt;
pub use topic::{TOPIC_TIME_FORMAT, Topic, TopicBoard};
pub use user::{MAX_NICK_LENGTH, User, UserCode, UserRef, is_valid_nick};
