use qbot_codec::event::UserInfo;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Names {
    by_id: HashMap<String, String>,
    by_name: HashMap<String, String>,
}

/// Maps user ids to display names and back. Clones share the same maps, so the rename worker
/// and the command processor see the same users.
#[derive(Clone, Default)]
pub struct UserDirectory {
    names: Arc<Mutex<Names>>,
}

impl UserDirectory {
    pub fn new(users: &[UserInfo]) -> Self {
        let dir = UserDirectory::default();

        for user in users {
            dir.update(user);
        }

        dir
    }

    fn lock(&self) -> MutexGuard<'_, Names> {
        // the maps are always consistent, a panicking holder cannot break them
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self, id: &str) -> Option<String> {
        self.lock().by_id.get(id).cloned()
    }

    pub fn id(&self, name: &str) -> Option<String> {
        self.lock().by_name.get(name).cloned()
    }

    /// Add or rename a user. Returns the previous name if the user was known.
    pub fn update(&self, user: &UserInfo) -> Option<String> {
        let mut names = self.lock();

        let previous = names.by_id.insert(user.id.clone(), user.name.clone());

        if let Some(old_name) = &previous {
            if names.by_name.get(old_name) == Some(&user.id) {
                names.by_name.remove(old_name);
            }
        }

        names.by_name.insert(user.name.clone(), user.id.clone());

        previous
    }

    pub fn len(&self) -> usize {
        self.lock().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_both_ways() {
        let dir = UserDirectory::new(&[UserInfo::new("U1", "craig"), UserInfo::new("U2", "edward")]);

        assert_eq!(dir.name("U1").as_deref(), Some("craig"));
        assert_eq!(dir.id("edward").as_deref(), Some("U2"));
        assert_eq!(dir.name("U3"), None);
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn rename_replaces_old_name() {
        let dir = UserDirectory::new(&[UserInfo::new("U1", "craig")]);
        let shared = dir.clone();

        assert_eq!(shared.update(&UserInfo::new("U1", "kraig")).as_deref(), Some("craig"));

        assert_eq!(dir.name("U1").as_deref(), Some("kraig"));
        assert_eq!(dir.id("kraig").as_deref(), Some("U1"));
        assert_eq!(dir.id("craig"), None);
    }

    #[test]
    fn new_user_is_added() {
        let dir = UserDirectory::default();

        assert!(dir.is_empty());
        assert_eq!(dir.update(&UserInfo::new("U9", "newbie")), None);
        assert_eq!(dir.name("U9").as_deref(), Some("newbie"));
    }
}
