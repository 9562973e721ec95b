use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use crate::errors::FaucetError;
use crate::state::{Faucet, Withdrawer};

/// Balance and authority of a token account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenBalance {
    pub mint: Pubkey,
    /// The only key allowed to move tokens out
    pub authority: Pubkey,
    pub amount: u64,
}

impl TokenBalance {
    pub fn new(mint: Pubkey, authority: Pubkey, amount: u64) -> Self {
        Self {
            mint,
            authority,
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    Faucet(Faucet),
    Withdrawer(Withdrawer),
    Token(TokenBalance),
}

/// Committed records, keyed by address.
#[derive(Debug, Default)]
pub struct Store {
    records: Mutex<BTreeMap<Pubkey, Record>>,
}

impl Store {
    pub fn get(&self, key: &Pubkey) -> Option<Record> {
        self.records().get(key).cloned()
    }

    pub fn insert(&self, key: Pubkey, record: Record) {
        self.records().insert(key, record);
    }

    /// Snapshot the records at `keys` into a new transaction.
    pub fn begin(&self, keys: impl IntoIterator<Item = Pubkey>) -> Txn {
        let records = self.records();
        let loaded = keys
            .into_iter()
            .map(|key| (key, records.get(&key).cloned()))
            .collect();
        Txn {
            loaded,
            writes: BTreeMap::new(),
        }
    }

    /// Apply every staged write of `txn`.
    pub fn commit(&self, txn: Txn) {
        self.records().extend(txn.writes);
    }

    fn records(&self) -> MutexGuard<'_, BTreeMap<Pubkey, Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Staged view over the records one instruction declared.
///
/// Reads see the transaction's own writes. Nothing reaches the store until
/// `Store::commit`; dropping the transaction discards it.
#[derive(Debug)]
pub struct Txn {
    loaded: BTreeMap<Pubkey, Option<Record>>,
    writes: BTreeMap<Pubkey, Record>,
}

impl Txn {
    fn lookup(&self, key: &Pubkey) -> Result<Option<&Record>> {
        if let Some(record) = self.writes.get(key) {
            return Ok(Some(record));
        }
        match self.loaded.get(key) {
            Some(record) => Ok(record.as_ref()),
            None => err!(FaucetError::AccountNotDeclared),
        }
    }

    pub fn get(&self, key: &Pubkey) -> Result<&Record> {
        self.lookup(key)?
            .ok_or_else(|| error!(FaucetError::AccountNotFound))
    }

    /// Fail if a record already lives at `key`.
    pub fn ensure_vacant(&self, key: &Pubkey) -> Result<()> {
        require!(
            self.lookup(key)?.is_none(),
            FaucetError::AccountAlreadyInitialized
        );
        Ok(())
    }

    pub fn put(&mut self, key: Pubkey, record: Record) -> Result<()> {
        require!(self.loaded.contains_key(&key), FaucetError::AccountNotDeclared);
        self.writes.insert(key, record);
        Ok(())
    }

    pub fn faucet(&self, key: &Pubkey) -> Result<Faucet> {
        match self.get(key)? {
            Record::Faucet(faucet) => Ok(faucet.clone()),
            _ => err!(ErrorCode::AccountDiscriminatorMismatch),
        }
    }

    pub fn withdrawer(&self, key: &Pubkey) -> Result<Withdrawer> {
        match self.get(key)? {
            Record::Withdrawer(withdrawer) => Ok(withdrawer.clone()),
            _ => err!(ErrorCode::AccountDiscriminatorMismatch),
        }
    }

    pub fn token(&self, key: &Pubkey) -> Result<TokenBalance> {
        match self.get(key)? {
            Record::Token(balance) => Ok(*balance),
            _ => err!(ErrorCode::AccountDiscriminatorMismatch),
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.writes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(amount: u64) -> Record {
        Record::Token(TokenBalance::new(Pubkey::default(), Pubkey::default(), amount))
    }

    #[test]
    fn test_writes_are_invisible_until_commit() {
        let store = Store::default();
        let key = Pubkey::new_unique();
        store.insert(key, balance(1));

        let mut txn = store.begin([key]);
        txn.put(key, balance(2)).unwrap();
        assert_eq!(txn.token(&key).unwrap().amount, 2);
        assert_eq!(store.get(&key), Some(balance(1)));

        store.commit(txn);
        assert_eq!(store.get(&key), Some(balance(2)));
    }

    #[test]
    fn test_dropped_txn_leaves_store_untouched() {
        let store = Store::default();
        let key = Pubkey::new_unique();

        let mut txn = store.begin([key]);
        txn.ensure_vacant(&key).unwrap();
        txn.put(key, balance(7)).unwrap();
        assert!(txn.is_dirty());
        drop(txn);

        assert_eq!(store.get(&key), None);
    }

    #[test]
    fn test_undeclared_access_fails() {
        let store = Store::default();
        let declared = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        store.insert(other, balance(1));

        let mut txn = store.begin([declared]);
        assert_eq!(txn.get(&other).unwrap_err(), FaucetError::AccountNotDeclared.into());
        assert_eq!(
            txn.put(other, balance(2)).unwrap_err(),
            FaucetError::AccountNotDeclared.into()
        );
        assert_eq!(txn.get(&declared).unwrap_err(), FaucetError::AccountNotFound.into());
    }

    #[test]
    fn test_wrong_record_kind() {
        let store = Store::default();
        let key = Pubkey::new_unique();
        store.insert(key, Record::Withdrawer(Withdrawer::default()));

        let txn = store.begin([key]);
        assert!(txn.withdrawer(&key).is_ok());
        assert_eq!(
            txn.faucet(&key).unwrap_err(),
            ErrorCode::AccountDiscriminatorMismatch.into()
        );
        assert_eq!(
            txn.ensure_vacant(&key).unwrap_err(),
            FaucetError::AccountAlreadyInitialized.into()
        );
    }
}
