//! Account administration client.

use std::sync::Arc;

use operis_billing::{DepositFilters, DepositPage, TransactionFilters, TransactionPage};
use operis_client::{QueryCache, Transport, cached_fetch};
use operis_core::{ClientError, ClientResult, QueryKey, UserId};

use crate::user::{TopupRequest, User, UserFilters, UserPage, UserUpdate};

fn user_lists() -> QueryKey {
    QueryKey::lists("users")
}

fn user_detail(id: &UserId) -> QueryKey {
    QueryKey::detail("users", id.as_str())
}

fn require_id(id: &UserId) -> ClientResult<()> {
    if id.is_empty() {
        return Err(ClientError::validation(0, "user id must not be empty"));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct UsersClient {
    transport: Arc<Transport>,
    cache: Arc<QueryCache>,
}

impl UsersClient {
    pub fn new(transport: Arc<Transport>, cache: Arc<QueryCache>) -> Self {
        Self { transport, cache }
    }

    /// Paged, searchable account list.
    pub async fn list(&self, filters: &UserFilters) -> ClientResult<UserPage> {
        let params = filters.params();
        let key = QueryKey::list("users", &params);
        cached_fetch(&self.cache, &key, || self.transport.get("/users", &params)).await
    }

    /// One account by id.
    pub async fn get(&self, id: &UserId) -> ClientResult<User> {
        require_id(id)?;
        let path = format!("/users/{id}");
        cached_fetch(&self.cache, &user_detail(id), || {
            self.transport.get(&path, &[])
        })
        .await
    }

    /// Edit profile fields. The response is the authoritative new profile:
    /// it is written through to the detail entry while every open list view
    /// refetches.
    pub async fn update(&self, id: &UserId, patch: &UserUpdate) -> ClientResult<User> {
        require_id(id)?;
        let updated: User = self.transport.patch(&format!("/users/{id}"), patch).await?;
        self.cache.invalidate_prefix(&user_lists());
        self.cache.write_through(&user_detail(id), &updated);
        tracing::info!(user = %id, "user profile updated");
        Ok(updated)
    }

    /// Delete an account. List views refetch; a detail view of the deleted
    /// account will 404 on its next read, which is the correct signal.
    pub async fn delete(&self, id: &UserId) -> ClientResult<()> {
        require_id(id)?;
        self.transport.delete(&format!("/users/{id}")).await?;
        self.cache.invalidate_prefix(&user_lists());
        tracing::info!(user = %id, "user deleted");
        Ok(())
    }

    /// Manually credit tokens to an account. The new balance comes from a
    /// refetch (the detail entry and its ledger drill-downs go stale), not
    /// from client-side arithmetic.
    pub async fn topup(&self, id: &UserId, request: &TopupRequest) -> ClientResult<()> {
        require_id(id)?;
        self.transport
            .post_unit(&format!("/users/{id}/topup"), request)
            .await?;
        self.cache.invalidate_prefix(&user_detail(id));
        self.cache.invalidate_prefix(&user_lists());
        tracing::info!(user = %id, amount = request.amount, "manual token top-up applied");
        Ok(())
    }

    /// Deposit history for one account, keyed under the account's detail so
    /// account-scoped invalidation covers it.
    pub async fn deposits(
        &self,
        id: &UserId,
        filters: &DepositFilters,
    ) -> ClientResult<DepositPage> {
        require_id(id)?;
        let mut params = filters.params();
        params.retain(|(name, _)| *name != "userId");
        params.push(("userId", id.to_string()));
        let key = user_detail(id).child("deposits").with_params(&params);
        cached_fetch(&self.cache, &key, || {
            self.transport.get("/deposits/admin/all", &params)
        })
        .await
    }

    /// Token transaction history for one account.
    pub async fn transactions(
        &self,
        id: &UserId,
        filters: &TransactionFilters,
    ) -> ClientResult<TransactionPage> {
        require_id(id)?;
        let params = filters.params();
        let key = user_detail(id).child("transactions").with_params(&params);
        let path = format!("/tokens/admin/user/{id}");
        cached_fetch(&self.cache, &key, || self.transport.get(&path, &params)).await
    }
}
