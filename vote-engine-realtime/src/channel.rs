/// A logical broadcast scope.
///
/// Subscribers join the channel for the content or user they care about;
/// the notifier emits into exactly the matching scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Vote and comment activity on one post.
    Post(i64),
    /// Vote and reply activity on one comment.
    Comment(i64),
    /// Notifications addressed to one user.
    User(i64),
}

impl Channel {
    /// Returns the channel key as expected by transport subscribers.
    pub fn key(&self) -> String {
        match self {
            Channel::Post(id) => format!("post_{id}"),
            Channel::Comment(id) => format!("comment_{id}"),
            Channel::User(id) => format!("user_{id}"),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
