//! Transfer, approval and ERC1363/permit commands against the in-memory token.

use alloy::primitives::{B256, U256};
use alloy::signers::Signature;

use edumeta_cli::commands::advanced::{self, CallArgs, PermitArgs};
use edumeta_cli::commands::approve::{self, ApproveArgs};
use edumeta_cli::commands::send::{self, SendArgs};
use edumeta_cli::commands::transfer_from::{self, TransferFromArgs};
use edumeta_cli::commands::CommandError;
use edumeta_cli::token::permit::{permit_digest, permit_domain, Permit};

mod common;
use common::{direct, output, session, tokens, MockToken, ScriptedPrompt, ALICE, BOB, CHAIN_ID, CONTRACT, SIGNER, TOKEN_NAME};

fn addr(a: alloy::primitives::Address) -> String {
    a.to_checksum(None)
}

fn send_args(to: &str, amount: &str) -> SendArgs {
    SendArgs {
        recipient: Some(to.to_string()),
        amount: Some(amount.to_string()),
    }
}

#[tokio::test]
async fn test_send_direct_success() {
    let mut s = direct(MockToken::new());
    send::run(&mut s, send_args(&addr(ALICE), "1.5")).await.unwrap();

    let out = output(&s);
    assert!(out.contains("✅ Transaction successful!"));
    assert!(out.contains("📤 Sent: 1.5 EDT"));
    assert!(out.contains("💰 New Balance: 998.5 EDT"));
    assert!(out.contains("🔗 Explorer: https://sepolia.etherscan.io/tx/0x"));
    assert_eq!(s.token.state().balance(ALICE), tokens(15) / U256::from(10u64));
}

#[tokio::test]
async fn test_send_invalid_address_makes_no_calls() {
    let mut s = direct(MockToken::new());
    let result = send::run(&mut s, send_args("0x1234", "1")).await;

    assert!(matches!(result, Err(CommandError::Input(_))));
    assert!(s.token.calls().is_empty());
    assert!(output(&s).is_empty());
}

#[tokio::test]
async fn test_send_invalid_amount_makes_no_calls() {
    for amount in ["0", "-1", "abc", "1.2.3"] {
        let mut s = direct(MockToken::new());
        let result = send::run(&mut s, send_args(&addr(ALICE), amount)).await;
        assert!(matches!(result, Err(CommandError::Input(_))), "amount {amount}");
        assert!(s.token.calls().is_empty(), "amount {amount}");
    }
}

#[tokio::test]
async fn test_send_more_than_balance_is_rejected_before_submitting() {
    let mut s = direct(MockToken::new());
    let err = send::run(&mut s, send_args(&addr(ALICE), "1000.5")).await.unwrap_err();

    assert_eq!(err.to_string(), "Insufficient balance. You have 1000.0 EDT");
    assert_eq!(s.token.calls(), vec!["balanceOf"]);
}

#[tokio::test]
async fn test_send_reverted_transaction_reports_failure() {
    let mut s = direct(MockToken::new().with(|st| st.revert_writes = true));
    let result = send::run(&mut s, send_args(&addr(ALICE), "1")).await;

    assert!(matches!(result, Err(CommandError::Reverted { .. })));
    let out = output(&s);
    assert!(out.contains("⏳ Waiting for confirmation..."));
    assert!(out.contains("❌ Transaction failed"));
    assert!(!out.contains("✅ Transaction successful!"));
    assert_eq!(s.token.state().balance(ALICE), U256::ZERO);
}

#[tokio::test]
async fn test_send_interactive_cancelled() {
    let prompt = ScriptedPrompt::new(&[&addr(ALICE), "10"], &[false]);
    let mut s = session(MockToken::new(), prompt);
    send::run(&mut s, SendArgs::default()).await.unwrap();

    assert!(output(&s).contains("❌ Transaction cancelled"));
    assert!(!s.token.calls().contains(&"transfer"));
}

#[tokio::test]
async fn test_send_interactive_reprompts_until_valid() {
    let alice = addr(ALICE);
    let prompt = ScriptedPrompt::new(&["0x123", &alice, "2000", "5"], &[true]);
    let mut s = session(MockToken::new(), prompt);
    send::run(&mut s, SendArgs::default()).await.unwrap();

    let out = output(&s);
    assert!(out.contains("❌ Invalid address: 0x123"));
    assert!(out.contains("❌ Insufficient balance. You have 1000.0 EDT"));
    assert!(out.contains("✅ Transaction successful!"));
    assert_eq!(s.token.state().balance(ALICE), tokens(5));
    assert_eq!(s.prompt.asked.last().map(String::as_str), Some("Confirm transaction?"));
}

#[tokio::test]
async fn test_send_interactive_requires_balance() {
    let mut s = direct(MockToken::new().with(|st| st.balances.clear()));
    let err = send::run(&mut s, SendArgs::default()).await.unwrap_err();

    assert_eq!(err.to_string(), "Insufficient balance to send tokens");
    assert!(s.prompt.asked.is_empty());
}

#[tokio::test]
async fn test_approve_prints_allowance_change() {
    let mut s = direct(MockToken::new());
    let args = ApproveArgs {
        spender: Some(addr(ALICE)),
        amount: Some("250".to_string()),
    };
    approve::run(&mut s, args).await.unwrap();

    let out = output(&s);
    assert!(out.contains("✅ Approval successful!"));
    assert!(out.contains("💰 New Allowance: 250.0 EDT (was 0.0 EDT)"));
    assert_eq!(s.token.state().allowances[&(SIGNER, ALICE)], tokens(250));
}

#[tokio::test]
async fn test_approve_reverted() {
    let mut s = direct(MockToken::new().with(|st| st.revert_writes = true));
    let args = ApproveArgs {
        spender: Some(addr(ALICE)),
        amount: Some("1".to_string()),
    };
    let result = approve::run(&mut s, args).await;

    assert!(matches!(result, Err(CommandError::Reverted { .. })));
    assert!(output(&s).contains("❌ Approval failed"));
}

fn transfer_from_args(amount: &str) -> TransferFromArgs {
    TransferFromArgs {
        from: Some(addr(ALICE)),
        to: Some(addr(BOB)),
        amount: Some(amount.to_string()),
    }
}

#[tokio::test]
async fn test_transfer_from_checks_allowance() {
    let token = MockToken::new().with(|st| {
        st.balances.insert(ALICE, tokens(100));
        st.allowances.insert((ALICE, SIGNER), tokens(5));
    });
    let mut s = direct(token);
    let err = transfer_from::run(&mut s, transfer_from_args("10")).await.unwrap_err();

    assert_eq!(err.to_string(), "Insufficient allowance. You can transfer 5.0 EDT");
    assert!(!s.token.calls().contains(&"transferFrom"));
}

#[tokio::test]
async fn test_transfer_from_checks_owner_balance() {
    let token = MockToken::new().with(|st| {
        st.balances.insert(ALICE, tokens(3));
        st.allowances.insert((ALICE, SIGNER), tokens(50));
    });
    let mut s = direct(token);
    let err = transfer_from::run(&mut s, transfer_from_args("10")).await.unwrap_err();

    assert_eq!(err.to_string(), "Insufficient balance. From address has 3.0 EDT");
}

#[tokio::test]
async fn test_transfer_from_success_spends_allowance() {
    let token = MockToken::new().with(|st| {
        st.balances.insert(ALICE, tokens(100));
        st.allowances.insert((ALICE, SIGNER), tokens(50));
    });
    let mut s = direct(token);
    transfer_from::run(&mut s, transfer_from_args("10")).await.unwrap();

    let out = output(&s);
    assert!(out.contains("✅ Transfer successful!"));
    assert!(out.contains("✅ New Allowance: 40.0 EDT (was 50.0 EDT)"));
    let state = s.token.state();
    assert_eq!(state.balance(BOB), tokens(10));
    assert_eq!(state.balance(ALICE), tokens(90));
}

#[tokio::test]
async fn test_permit_signature_recovers_signer() {
    let mut s = direct(MockToken::new());
    let args = PermitArgs {
        spender: addr(ALICE),
        amount: "25".to_string(),
        deadline_secs: 600,
    };
    advanced::permit(&mut s, args).await.unwrap();

    assert!(output(&s).contains("✅ Permit successful!"));
    let state = s.token.state();
    assert_eq!(state.allowances[&(SIGNER, ALICE)], tokens(25));

    let signed = state.last_permit.clone().unwrap();
    assert!(signed.v == 27 || signed.v == 28);
    let message = Permit {
        owner: SIGNER,
        spender: ALICE,
        value: tokens(25),
        nonce: U256::ZERO,
        deadline: signed.deadline,
    };
    let digest = permit_digest(&permit_domain(TOKEN_NAME.to_string(), CHAIN_ID, CONTRACT), &message);
    let signature = Signature::new(
        U256::from_be_bytes(signed.r.0),
        U256::from_be_bytes(signed.s.0),
        signed.v == 28,
    );
    assert_eq!(signature.recover_address_from_prehash(&digest).unwrap(), SIGNER);
}

#[tokio::test]
async fn test_permit_refuses_mismatched_domain() {
    let mut s = direct(MockToken::new().with(|st| st.domain_separator = Some(B256::repeat_byte(0xab))));
    let args = PermitArgs {
        spender: addr(ALICE),
        amount: "25".to_string(),
        deadline_secs: 600,
    };
    let err = advanced::permit(&mut s, args).await.unwrap_err();

    assert!(matches!(err, CommandError::Precondition(_)));
    assert!(err.to_string().contains("Permit domain does not match the contract"));
    let calls = s.token.calls();
    assert!(!calls.contains(&"nonces"));
    assert!(!calls.contains(&"permit"));
    assert!(s.token.state().last_permit.is_none());
}

#[tokio::test]
async fn test_transfer_and_call_rejects_bad_data_without_calls() {
    let mut s = direct(MockToken::new());
    let args = CallArgs {
        target: addr(ALICE),
        amount: "1".to_string(),
        data: Some("0xzz".to_string()),
    };
    let result = advanced::transfer_and_call(&mut s, args).await;

    assert!(matches!(result, Err(CommandError::Input(_))));
    assert!(s.token.calls().is_empty());
}

#[tokio::test]
async fn test_transfer_and_call_forwards_data() {
    let mut s = direct(MockToken::new());
    let args = CallArgs {
        target: addr(ALICE),
        amount: "2".to_string(),
        data: Some("0xcafe".to_string()),
    };
    advanced::transfer_and_call(&mut s, args).await.unwrap();

    let state = s.token.state();
    assert_eq!(state.balance(ALICE), tokens(2));
    assert_eq!(state.last_call_data.as_ref().map(|d| d.to_vec()), Some(vec![0xca, 0xfe]));
}

#[tokio::test]
async fn test_approve_and_call_sets_allowance() {
    let mut s = direct(MockToken::new());
    let args = CallArgs {
        target: addr(BOB),
        amount: "7".to_string(),
        data: None,
    };
    advanced::approve_and_call(&mut s, args).await.unwrap();

    assert!(output(&s).contains("✅ New Allowance: 7.0 EDT"));
    assert_eq!(s.token.state().last_call_data.as_ref().map(|d| d.len()), Some(0));
}
