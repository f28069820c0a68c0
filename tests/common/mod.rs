//! Shared utilities for command integration tests.
//!
//! `MockToken` keeps ERC20 state in memory and records every remote call,
//! `ScriptedPrompt` replays canned answers.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::sync::Mutex;

use alloy::primitives::{address, Address, Bytes, TxHash, B256, U256};
use alloy::signers::Signature;

use edumeta_cli::blockchain::{BlockchainError, BlockchainResult, ConfirmationStatus, Wallet};
use edumeta_cli::cli::{Console, Prompt};
use edumeta_cli::config::CliConfig;
use edumeta_cli::token::permit::permit_domain;
use edumeta_cli::token::{SignedPermit, TokenApi, TransferQuery, TransferRecord};
use edumeta_cli::Session;

/// Anvil account #0.
pub const SIGNER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const SIGNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const ALICE: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
pub const BOB: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");
pub const CONTRACT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const TOKEN_NAME: &str = "EduMeta";
pub const CHAIN_ID: u64 = 11_155_111;
pub const GAS_USED: u64 = 51_234;

pub type TestSession = Session<MockToken, ScriptedPrompt, Vec<u8>>;

/// `n` whole tokens in base units.
pub fn tokens(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

#[derive(Debug)]
pub struct MockState {
    pub balances: HashMap<Address, U256>,
    pub allowances: HashMap<(Address, Address), U256>,
    pub total_supply: U256,
    pub owner: Address,
    pub paused: bool,
    pub nonces: HashMap<Address, U256>,
    pub transfers: Vec<TransferRecord>,
    pub last_permit: Option<SignedPermit>,
    pub last_call_data: Option<Bytes>,
    /// Writes submitted while set are mined as reverted.
    pub revert_writes: bool,
    pub reverted: HashSet<TxHash>,
    pub calls: Vec<&'static str>,
    pub block: u64,
    /// Replaces the separator derived from name, chain id and address.
    pub domain_separator: Option<B256>,
}

pub struct MockToken {
    state: Mutex<MockState>,
    wallet: Wallet,
}

impl MockToken {
    /// Signer owns the contract and holds 1000 tokens.
    pub fn new() -> Self {
        let wallet = Wallet::from_private_key(SIGNER_KEY, CHAIN_ID).unwrap();
        let mut balances = HashMap::new();
        balances.insert(SIGNER, tokens(1000));
        Self {
            state: Mutex::new(MockState {
                balances,
                allowances: HashMap::new(),
                total_supply: tokens(1000),
                owner: SIGNER,
                paused: false,
                nonces: HashMap::new(),
                transfers: Vec::new(),
                last_permit: None,
                last_call_data: None,
                revert_writes: false,
                reverted: HashSet::new(),
                calls: Vec::new(),
                block: 100,
                domain_separator: None,
            }),
            wallet,
        }
    }

    pub fn with<F: FnOnce(&mut MockState)>(self, f: F) -> Self {
        f(&mut *self.state.lock().unwrap());
        self
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    fn read<R>(&self, op: &'static str, f: impl FnOnce(&MockState) -> R) -> BlockchainResult<R> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        Ok(f(&*state))
    }

    fn write(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut MockState) -> Result<(), String>,
    ) -> BlockchainResult<TxHash> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        state.block += 1;
        let tx_hash = B256::from(U256::from(state.block).to_be_bytes::<32>());

        if state.revert_writes {
            state.reverted.insert(tx_hash);
            return Ok(tx_hash);
        }
        f(&mut *state).map_err(|e| BlockchainError::Contract(format!("{}: execution reverted: {}", op, e)))?;
        Ok(tx_hash)
    }
}

impl Default for MockToken {
    fn default() -> Self {
        Self::new()
    }
}

impl MockState {
    pub fn balance(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn not_paused(&self) -> Result<(), String> {
        if self.paused {
            Err("EnforcedPause".to_string())
        } else {
            Ok(())
        }
    }

    fn move_tokens(&mut self, from: Address, to: Address, value: U256, tx_hash: TxHash) -> Result<(), String> {
        self.not_paused()?;
        let from_balance = self.balance(from);
        if from_balance < value {
            return Err("ERC20InsufficientBalance".to_string());
        }
        self.balances.insert(from, from_balance - value);
        *self.balances.entry(to).or_default() += value;
        let log_index = self.transfers.len() as u64;
        self.transfers.push(TransferRecord {
            from,
            to,
            value,
            block_number: self.block,
            log_index,
            tx_hash,
        });
        Ok(())
    }

    fn spend_allowance(&mut self, owner: Address, spender: Address, value: U256) -> Result<(), String> {
        let current = self.allowances.get(&(owner, spender)).copied().unwrap_or_default();
        if current < value {
            return Err("ERC20InsufficientAllowance".to_string());
        }
        self.allowances.insert((owner, spender), current - value);
        Ok(())
    }

    fn current_hash(&self) -> TxHash {
        B256::from(U256::from(self.block).to_be_bytes::<32>())
    }

    /// Record a transfer that happened before the test started.
    pub fn push_transfer(&mut self, from: Address, to: Address, value: U256) {
        self.block += 1;
        let tx_hash = self.current_hash();
        let log_index = self.transfers.len() as u64;
        self.transfers.push(TransferRecord {
            from,
            to,
            value,
            block_number: self.block,
            log_index,
            tx_hash,
        });
    }
}

impl TokenApi for MockToken {
    fn signer_address(&self) -> Address {
        self.wallet.address()
    }

    fn contract_address(&self) -> Address {
        CONTRACT
    }

    fn chain_id(&self) -> u64 {
        CHAIN_ID
    }

    async fn name(&self) -> BlockchainResult<String> {
        self.read("name", |_| TOKEN_NAME.to_string())
    }

    async fn symbol(&self) -> BlockchainResult<String> {
        self.read("symbol", |_| "EDT".to_string())
    }

    async fn decimals(&self) -> BlockchainResult<u8> {
        self.read("decimals", |_| 18)
    }

    async fn total_supply(&self) -> BlockchainResult<U256> {
        self.read("totalSupply", |s| s.total_supply)
    }

    async fn balance_of(&self, account: Address) -> BlockchainResult<U256> {
        self.read("balanceOf", |s| s.balance(account))
    }

    async fn allowance(&self, owner: Address, spender: Address) -> BlockchainResult<U256> {
        self.read("allowance", |s| s.allowances.get(&(owner, spender)).copied().unwrap_or_default())
    }

    async fn owner(&self) -> BlockchainResult<Address> {
        self.read("owner", |s| s.owner)
    }

    async fn paused(&self) -> BlockchainResult<bool> {
        self.read("paused", |s| s.paused)
    }

    async fn nonces(&self, owner: Address) -> BlockchainResult<U256> {
        self.read("nonces", |s| s.nonces.get(&owner).copied().unwrap_or_default())
    }

    async fn domain_separator(&self) -> BlockchainResult<B256> {
        self.read("DOMAIN_SEPARATOR", |s| {
            s.domain_separator
                .unwrap_or_else(|| permit_domain(TOKEN_NAME.to_string(), CHAIN_ID, CONTRACT).separator())
        })
    }

    async fn max_flash_loan(&self) -> BlockchainResult<U256> {
        self.read("maxFlashLoan", |s| U256::MAX - s.total_supply)
    }

    async fn transfer(&self, to: Address, amount: U256) -> BlockchainResult<TxHash> {
        let from = self.signer_address();
        self.write("transfer", |s| {
            let tx_hash = s.current_hash();
            s.move_tokens(from, to, amount, tx_hash)
        })
    }

    async fn transfer_from(&self, from: Address, to: Address, amount: U256) -> BlockchainResult<TxHash> {
        let spender = self.signer_address();
        self.write("transferFrom", |s| {
            s.spend_allowance(from, spender, amount)?;
            let tx_hash = s.current_hash();
            s.move_tokens(from, to, amount, tx_hash)
        })
    }

    async fn approve(&self, spender: Address, amount: U256) -> BlockchainResult<TxHash> {
        let owner = self.signer_address();
        self.write("approve", |s| {
            s.allowances.insert((owner, spender), amount);
            Ok(())
        })
    }

    async fn mint(&self, to: Address, amount: U256) -> BlockchainResult<TxHash> {
        let caller = self.signer_address();
        self.write("mint", |s| {
            if s.owner != caller {
                return Err("OwnableUnauthorizedAccount".to_string());
            }
            s.not_paused()?;
            s.total_supply += amount;
            *s.balances.entry(to).or_default() += amount;
            Ok(())
        })
    }

    async fn burn(&self, amount: U256) -> BlockchainResult<TxHash> {
        let from = self.signer_address();
        self.write("burn", |s| {
            s.not_paused()?;
            let balance = s.balance(from);
            if balance < amount {
                return Err("ERC20InsufficientBalance".to_string());
            }
            s.balances.insert(from, balance - amount);
            s.total_supply -= amount;
            Ok(())
        })
    }

    async fn pause(&self) -> BlockchainResult<TxHash> {
        self.write("pause", |s| {
            s.paused = true;
            Ok(())
        })
    }

    async fn unpause(&self) -> BlockchainResult<TxHash> {
        self.write("unpause", |s| {
            s.paused = false;
            Ok(())
        })
    }

    async fn permit(&self, permit: &SignedPermit) -> BlockchainResult<TxHash> {
        let permit = permit.clone();
        self.write("permit", |s| {
            *s.nonces.entry(permit.owner).or_default() += U256::from(1u64);
            s.allowances.insert((permit.owner, permit.spender), permit.value);
            s.last_permit = Some(permit);
            Ok(())
        })
    }

    async fn transfer_and_call(&self, to: Address, amount: U256, data: Bytes) -> BlockchainResult<TxHash> {
        let from = self.signer_address();
        self.write("transferAndCall", |s| {
            s.last_call_data = Some(data);
            let tx_hash = s.current_hash();
            s.move_tokens(from, to, amount, tx_hash)
        })
    }

    async fn approve_and_call(&self, spender: Address, amount: U256, data: Bytes) -> BlockchainResult<TxHash> {
        let owner = self.signer_address();
        self.write("approveAndCall", |s| {
            s.last_call_data = Some(data);
            s.allowances.insert((owner, spender), amount);
            Ok(())
        })
    }

    async fn flash_loan(&self, _receiver: Address, _amount: U256, data: Bytes) -> BlockchainResult<TxHash> {
        self.write("flashLoan", |s| {
            s.last_call_data = Some(data);
            Ok(())
        })
    }

    async fn transfer_events(&self, query: TransferQuery) -> BlockchainResult<Vec<TransferRecord>> {
        self.read("getLogs", |s| {
            s.transfers.iter().filter(|r| query.matches(r)).cloned().collect()
        })
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> BlockchainResult<ConfirmationStatus> {
        let state = self.state.lock().unwrap();
        let block_number = u64::try_from(U256::from_be_bytes(tx_hash.0)).unwrap();
        if state.reverted.contains(&tx_hash) {
            Ok(ConfirmationStatus::Failed {
                block_number: Some(block_number),
            })
        } else {
            Ok(ConfirmationStatus::Confirmed {
                block_number,
                gas_used: GAS_USED,
            })
        }
    }

    async fn sign_hash(&self, hash: B256) -> BlockchainResult<Signature> {
        self.wallet.sign_hash(hash).await
    }
}

/// Replays canned answers; runs dry with `UnexpectedEof`.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    pub inputs: VecDeque<String>,
    pub confirms: VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(inputs: &[&str], confirms: &[bool]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            confirms: confirms.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn input(&mut self, message: &str, default: Option<&str>) -> io::Result<String> {
        self.asked.push(message.to_string());
        let answer = self
            .inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted input"))?;
        match (answer.is_empty(), default) {
            (true, Some(d)) => Ok(d.to_string()),
            _ => Ok(answer),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> io::Result<bool> {
        self.asked.push(message.to_string());
        self.confirms
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted confirmation"))
    }
}

pub fn test_config() -> CliConfig {
    let mut config = CliConfig::default();
    config.token.contract_address = CONTRACT.to_checksum(None);
    config
}

pub fn session(token: MockToken, prompt: ScriptedPrompt) -> TestSession {
    Session::new(token, test_config(), prompt, Console::new(Vec::new()))
}

/// Session with no scripted answers, for direct-mode commands.
pub fn direct(token: MockToken) -> TestSession {
    session(token, ScriptedPrompt::default())
}

pub fn output(s: &TestSession) -> String {
    String::from_utf8_lossy(s.console.get_ref()).into_owned()
}
