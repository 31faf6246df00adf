//! Nullable ledger — thread-safe in-memory multi-asset balance store.

use chorus_ledger::{LedgerError, LedgerMutator, LedgerView};
use chorus_types::{HolderAddress, SnapshotId, TokenId};
use std::collections::HashMap;
use std::sync::Mutex;

/// Balances and supply of one token, as stored live or inside a snapshot.
#[derive(Clone, Debug, Default)]
struct TokenBook {
    balances: HashMap<HolderAddress, u128>,
    total_supply: u128,
}

/// An immutable capture of one token's book.
#[derive(Clone, Debug)]
struct SnapshotRecord {
    token: TokenId,
    book: TokenBook,
}

/// An in-memory multi-asset ledger for testing.
///
/// Snapshot ids are issued from a single monotonic counter shared by all
/// tokens, matching the real ledger's generator.
pub struct NullLedger {
    books: Mutex<HashMap<TokenId, TokenBook>>,
    snapshots: Mutex<HashMap<SnapshotId, SnapshotRecord>>,
    next_snapshot: Mutex<u64>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(HashMap::new()),
            snapshots: Mutex::new(HashMap::new()),
            next_snapshot: Mutex::new(1),
        }
    }

    /// Register a token with zero supply.
    pub fn register_token(&self, token: TokenId) {
        self.books.lock().unwrap().entry(token).or_default();
    }

    /// Register a token and mint starting balances in one step.
    pub fn register_with_balances(&self, token: TokenId, balances: &[(&HolderAddress, u128)]) {
        let mut books = self.books.lock().unwrap();
        let book = books.entry(token).or_default();
        for (holder, amount) in balances {
            *book.balances.entry((*holder).clone()).or_insert(0) += amount;
            book.total_supply += amount;
        }
    }

    /// Number of snapshots taken so far.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerView for NullLedger {
    fn token_exists(&self, token: TokenId) -> bool {
        self.books.lock().unwrap().contains_key(&token)
    }

    fn balance_of(&self, holder: &HolderAddress, token: TokenId) -> Result<u128, LedgerError> {
        let books = self.books.lock().unwrap();
        let book = books.get(&token).ok_or(LedgerError::UnknownToken(token))?;
        Ok(book.balances.get(holder).copied().unwrap_or(0))
    }

    fn total_supply(&self, token: TokenId) -> Result<u128, LedgerError> {
        let books = self.books.lock().unwrap();
        let book = books.get(&token).ok_or(LedgerError::UnknownToken(token))?;
        Ok(book.total_supply)
    }

    fn balance_of_at(
        &self,
        holder: &HolderAddress,
        snapshot: SnapshotId,
        token: TokenId,
    ) -> Result<u128, LedgerError> {
        let snapshots = self.snapshots.lock().unwrap();
        let record = snapshots
            .get(&snapshot)
            .ok_or(LedgerError::UnknownSnapshot(snapshot))?;
        if record.token != token {
            return Err(LedgerError::SnapshotTokenMismatch { snapshot, token });
        }
        Ok(record.book.balances.get(holder).copied().unwrap_or(0))
    }

    fn total_supply_at(&self, snapshot: SnapshotId, token: TokenId) -> Result<u128, LedgerError> {
        let snapshots = self.snapshots.lock().unwrap();
        let record = snapshots
            .get(&snapshot)
            .ok_or(LedgerError::UnknownSnapshot(snapshot))?;
        if record.token != token {
            return Err(LedgerError::SnapshotTokenMismatch { snapshot, token });
        }
        Ok(record.book.total_supply)
    }
}

impl LedgerMutator for NullLedger {
    fn snapshot(&mut self, token: TokenId) -> Result<SnapshotId, LedgerError> {
        let book = {
            let books = self.books.lock().unwrap();
            books
                .get(&token)
                .ok_or(LedgerError::UnknownToken(token))?
                .clone()
        };
        let mut next = self.next_snapshot.lock().unwrap();
        let id = SnapshotId::new(*next);
        *next += 1;
        self.snapshots
            .lock()
            .unwrap()
            .insert(id, SnapshotRecord { token, book });
        Ok(id)
    }

    fn mint(
        &mut self,
        token: TokenId,
        amount: u128,
        to: &HolderAddress,
    ) -> Result<(), LedgerError> {
        let mut books = self.books.lock().unwrap();
        let book = books
            .get_mut(&token)
            .ok_or(LedgerError::UnknownToken(token))?;
        book.total_supply = book
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = book.balances.entry(to.clone()).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn transfer(
        &mut self,
        token: TokenId,
        from: &HolderAddress,
        to: &HolderAddress,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let mut books = self.books.lock().unwrap();
        let book = books
            .get_mut(&token)
            .ok_or(LedgerError::UnknownToken(token))?;
        let available = book.balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                holder: from.clone(),
                available,
                needed: amount,
            });
        }
        book.balances.insert(from.clone(), available - amount);
        let to_balance = book.balances.entry(to.clone()).or_insert(0);
        *to_balance = to_balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}
