use blaek_common::models::blog::Blog;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Transient message shown above rendered lists
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
}

/// Full client-side state: the ordered blog list plus at most one
/// notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub blogs: Vec<Blog>,
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone)]
pub enum Action {
    BlogsLoaded(Vec<Blog>),
    BlogAdded(Blog),
    BlogUpdated(Blog),
    BlogRemoved(Uuid),
    NotificationSet(String),
    NotificationCleared,
}

/// Pure reducer: old state + action -> new state. The input state is never
/// mutated; unknown ids in updates/removals leave the list unchanged.
pub fn reduce(state: &State, action: Action) -> State {
    match action {
        Action::BlogsLoaded(blogs) => State {
            blogs,
            notification: state.notification.clone(),
        },
        Action::BlogAdded(blog) => {
            let mut blogs = state.blogs.clone();
            blogs.push(blog);
            State {
                blogs,
                notification: state.notification.clone(),
            }
        }
        Action::BlogUpdated(blog) => State {
            blogs: state
                .blogs
                .iter()
                .map(|b| if b.id == blog.id { blog.clone() } else { b.clone() })
                .collect(),
            notification: state.notification.clone(),
        },
        Action::BlogRemoved(id) => State {
            blogs: state
                .blogs
                .iter()
                .filter(|b| b.id != id)
                .cloned()
                .collect(),
            notification: state.notification.clone(),
        },
        Action::NotificationSet(text) => State {
            blogs: state.blogs.clone(),
            notification: Some(Notification { text }),
        },
        Action::NotificationCleared => State {
            blogs: state.blogs.clone(),
            notification: None,
        },
    }
}

/// Explicitly constructed state container. Dispatches run the pure reducer
/// and publish the new state on a watch channel; there is no ambient global.
pub struct Store {
    tx: watch::Sender<State>,
    clear_timer: Mutex<Option<CancellationToken>>,
}

impl Store {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(State::default());
        Self {
            tx,
            clear_timer: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> State {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.tx.subscribe()
    }

    pub fn dispatch(&self, action: Action) {
        self.tx.send_modify(|state| *state = reduce(state, action));
    }

    /// Set the notification and schedule its clear after `ttl`. A newer
    /// notification cancels the pending clear and starts its own timer, so a
    /// stale timer can never wipe a fresher message.
    pub fn notify(&self, text: &str, ttl: Duration) {
        self.dispatch(Action::NotificationSet(text.to_string()));

        let cancel = CancellationToken::new();
        let previous = {
            let mut guard = self.clear_timer.lock().unwrap();
            guard.replace(cancel.clone())
        };
        if let Some(previous) = previous {
            previous.cancel();
        }

        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(ttl) => {
                    tx.send_modify(|state| *state = reduce(state, Action::NotificationCleared));
                }
                _ = cancel.cancelled() => {}
            }
        });
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blaek_common::models::user::UserSummary;

    fn blog(title: &str, likes: i64) -> Blog {
        Blog {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: None,
            url: format!("https://example.com/{}", title),
            likes,
            user: UserSummary {
                id: Uuid::new_v4(),
                username: "ada".to_string(),
                name: None,
            },
        }
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let initial = State {
            blogs: vec![blog("one", 0)],
            notification: None,
        };
        let before = initial.clone();

        let next = reduce(&initial, Action::BlogAdded(blog("two", 3)));

        assert_eq!(initial, before);
        assert_eq!(next.blogs.len(), 2);
    }

    #[test]
    fn test_reduce_add_preserves_order() {
        let state = State::default();
        let state = reduce(&state, Action::BlogAdded(blog("first", 0)));
        let state = reduce(&state, Action::BlogAdded(blog("second", 0)));

        let titles: Vec<&str> = state.blogs.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_reduce_update_replaces_matching_entry() {
        let target = blog("votable", 0);
        let other = blog("bystander", 1);
        let state = State {
            blogs: vec![target.clone(), other.clone()],
            notification: None,
        };

        let mut voted = target.clone();
        voted.likes = 1;
        let next = reduce(&state, Action::BlogUpdated(voted));

        assert_eq!(next.blogs[0].likes, 1);
        assert_eq!(next.blogs[1], other);
    }

    #[test]
    fn test_reduce_update_unknown_id_is_noop() {
        let state = State {
            blogs: vec![blog("only", 0)],
            notification: None,
        };
        let next = reduce(&state, Action::BlogUpdated(blog("stranger", 9)));
        assert_eq!(next.blogs, state.blogs);
    }

    #[test]
    fn test_reduce_remove() {
        let doomed = blog("doomed", 0);
        let keep = blog("keep", 0);
        let state = State {
            blogs: vec![doomed.clone(), keep.clone()],
            notification: None,
        };

        let next = reduce(&state, Action::BlogRemoved(doomed.id));
        assert_eq!(next.blogs, vec![keep]);
    }

    #[test]
    fn test_reduce_notification_set_and_clear() {
        let state = State::default();
        let state = reduce(&state, Action::NotificationSet("saved".to_string()));
        assert_eq!(
            state.notification,
            Some(Notification {
                text: "saved".to_string()
            })
        );

        let state = reduce(&state, Action::NotificationCleared);
        assert!(state.notification.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_publishes_to_subscribers() {
        let store = Store::new();
        let mut rx = store.subscribe();

        store.dispatch(Action::BlogAdded(blog("published", 0)));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().blogs.len(), 1);
    }

    #[tokio::test]
    async fn test_notification_auto_clears() {
        let store = Store::new();

        store.notify("short-lived", Duration::from_millis(50));
        assert!(store.snapshot().notification.is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(store.snapshot().notification.is_none());
    }

    #[tokio::test]
    async fn test_notification_overwrite_resets_timer() {
        let store = Store::new();

        store.notify("first", Duration::from_millis(200));
        tokio::time::sleep(Duration::from_millis(120)).await;

        // Overwrite before the first timer fires; its clear must not apply
        store.notify("second", Duration::from_millis(200));
        tokio::time::sleep(Duration::from_millis(120)).await;

        let current = store.snapshot().notification;
        assert_eq!(
            current,
            Some(Notification {
                text: "second".to_string()
            })
        );

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(store.snapshot().notification.is_none());
    }
}
