mod mention;
mod messaging;
mod payout;
mod shifubriq;
mod users;

pub use mention::*;
pub use messaging::*;
pub use payout::*;
pub use shifubriq::*;
pub use users::*;

/// In-memory collaborator doubles shared by the service and server
/// tests. They record every outbound call behind plain mutexes.
#[cfg(test)]
pub mod testing {
    use crate::providers::Bank;
    use crate::providers::Chat;
    use crate::providers::Team;
    use crate::providers::Transaction;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub struct Post {
        pub text: String,
        pub user: String,
        pub attached: bool,
    }

    pub struct FakeChat {
        directory: HashMap<String, String>,
        posts: Mutex<Vec<Post>>,
    }

    impl FakeChat {
        pub fn with_users(users: &[(&str, &str)]) -> Self {
            Self {
                directory: users
                    .iter()
                    .map(|(id, name)| (id.to_string(), name.to_string()))
                    .collect(),
                posts: Mutex::new(Vec::new()),
            }
        }
        pub fn posts(&self) -> Vec<Post> {
            self.posts.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Chat for FakeChat {
        async fn directory(&self) -> anyhow::Result<HashMap<String, String>> {
            Ok(self.directory.clone())
        }
        async fn post(
            &self,
            text: &str,
            user: &str,
            attachments: Option<&serde_json::Value>,
        ) -> anyhow::Result<()> {
            self.posts.lock().unwrap().push(Post {
                text: text.to_string(),
                user: user.to_string(),
                attached: attachments.is_some(),
            });
            Ok(())
        }
        async fn team(&self) -> anyhow::Result<Team> {
            Ok(Team {
                id: "T1".to_string(),
                name: "acme".to_string(),
                domain: "acme".to_string(),
                email_domain: "acme.example".to_string(),
            })
        }
    }

    #[derive(Default)]
    pub struct FakeBank {
        transfers: Mutex<Vec<(Transaction, String)>>,
    }

    impl FakeBank {
        pub fn transfers(&self) -> Vec<(Transaction, String)> {
            self.transfers.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Bank for FakeBank {
        async fn transfer(&self, transaction: &Transaction, organization: &str) -> anyhow::Result<()> {
            self.transfers
                .lock()
                .unwrap()
                .push((transaction.clone(), organization.to_string()));
            Ok(())
        }
    }
}
