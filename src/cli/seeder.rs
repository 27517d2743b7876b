use std::time::Instant;

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use rolegate_core::hash_password;
use rolegate_db::{StoreError, UserStore};
use rolegate_models::{NewUser, Role};
use tracing::info;

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub admins: usize,
    pub moderators: usize,
    pub users: usize,
    pub skipped: usize,
}

impl SeedSummary {
    pub fn created(&self) -> usize {
        self.admins + self.moderators + self.users
    }

    fn record(&mut self, role: Role) {
        match role {
            Role::Admin => self.admins += 1,
            Role::Moderator => self.moderators += 1,
            Role::User => self.users += 1,
        }
    }
}

/// Roughly 5% admins, 20% moderators, the rest users.
fn random_role() -> Role {
    match (0..100u8).fake::<u8>() {
        0..5 => Role::Admin,
        5..25 => Role::Moderator,
        _ => Role::User,
    }
}

/// Inserts `count` fake users. Email collisions with existing rows are
/// skipped, not fatal.
pub async fn seed_users(store: &dyn UserStore, count: usize) -> anyhow::Result<SeedSummary> {
    let start = Instant::now();
    let password_hash = hash_password(SEED_PASSWORD).map_err(|e| e.error)?;
    let mut summary = SeedSummary::default();

    for i in 0..count {
        let email: String = SafeEmail().fake();
        let role = random_role();
        let user = NewUser {
            name: Name().fake(),
            email: format!("seed{}.{}", i, email),
            password_hash: password_hash.clone(),
            role,
        };

        match store.create(user).await {
            Ok(_) => summary.record(role),
            Err(StoreError::Conflict(_)) => summary.skipped += 1,
            Err(err) => return Err(err.into()),
        }
    }

    info!(
        created = summary.created(),
        skipped = summary.skipped,
        elapsed_ms = start.elapsed().as_millis(),
        "Seeding complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_db::MemoryUserStore;

    #[tokio::test]
    async fn test_seed_users_creates_requested_count() {
        let store = MemoryUserStore::new();
        let summary = seed_users(&store, 25).await.unwrap();

        assert_eq!(summary.created() + summary.skipped, 25);
        assert_eq!(store.len().await, summary.created());

        let admins = store.list_by_role(Role::Admin).await.unwrap().len();
        assert_eq!(admins, summary.admins);
    }

    #[test]
    fn test_random_role_stays_in_set() {
        for _ in 0..200 {
            assert!(Role::all().contains(&random_role()));
        }
    }
}
