use dioxus::prelude::*;
use crate::components::common::WalletContext;
use crate::components::hooks::use_stake_tokens;
use crate::config::tokens::Token;
use crate::staking::{self, StakeStep};
use crate::transaction::{TransactionState, TransactionStatus};
use crate::units::{parse_units, TOKEN_DECIMALS};

#[derive(Clone, Copy, PartialEq)]
enum Notification {
    Approved,
    Staked,
    Unstaked,
}

#[component]
pub fn StakeForm(token: Token, token_farm: String, refresh: Signal<u32>) -> Element {
    let wallet = use_context::<WalletContext>();
    let stake = use_stake_tokens(token_farm.clone(), token.address.clone());
    let stake_state = stake.state;

    let mut amount = use_signal(|| "".to_string());
    let mut input_error = use_signal(|| None::<String>);
    let mut notification = use_signal(|| None::<Notification>);
    let mut unstake_state = use_signal(TransactionState::default);

    // Notify on each completed step and refresh balances after the stake lands
    let mut refresh_balances = refresh;
    use_effect(move || {
        let progress = stake_state.read();
        match (progress.step, progress.state.status) {
            (StakeStep::Approve, TransactionStatus::Success) => {
                notification.set(Some(Notification::Approved))
            }
            (StakeStep::Stake, TransactionStatus::Success) => {
                notification.set(Some(Notification::Staked));
                *refresh_balances.write() += 1;
            }
            _ => {}
        }
    });

    let progress = stake_state.read().clone();
    let is_mining = progress.is_busy() || unstake_state.read().status.is_in_flight();
    let disabled = is_mining || token.is_null();

    let status_text = match (progress.step, progress.state.status) {
        (_, TransactionStatus::None) => None,
        (StakeStep::Approve, TransactionStatus::PendingSignature) => {
            Some("Waiting for approval signature...".to_string())
        }
        (StakeStep::Approve, TransactionStatus::Mining) => {
            Some("Approving token transfer...".to_string())
        }
        (StakeStep::Stake, TransactionStatus::PendingSignature) => {
            Some("Waiting for stake signature...".to_string())
        }
        (StakeStep::Stake, TransactionStatus::Mining) => Some("Staking tokens...".to_string()),
        (step, status) if status.is_failure() => {
            let what = if step == StakeStep::Approve { "Approval" } else { "Stake" };
            let detail = progress
                .state
                .error
                .clone()
                .unwrap_or_else(|| "unknown error".to_string());
            Some(format!("{} failed: {}", what, detail))
        }
        _ => None,
    };

    let unstake_token = token.address.clone();
    let unstake_farm = token_farm.clone();
    let token_name = token.name.clone();

    rsx! {
        div {
            class: "stake-form",

            div {
                class: "stake-input-row",
                input {
                    class: "stake-amount-input",
                    r#type: "text",
                    placeholder: "Amount of {token_name}",
                    value: "{amount}",
                    oninput: move |evt| {
                        amount.set(evt.value());
                        input_error.set(None);
                    }
                }
                button {
                    class: "button-standard primary",
                    disabled: disabled,
                    onclick: move |_| {
                        notification.set(None);
                        match parse_units(&amount(), TOKEN_DECIMALS) {
                            Ok(raw) if raw == "0" => {
                                let message = "Amount must be greater than zero".to_string();
                                input_error.set(Some(message))
                            }
                            Ok(raw) => stake.approve_and_stake(raw),
                            Err(e) => input_error.set(Some(e)),
                        }
                    },
                    if is_mining { "Working..." } else { "Stake!!!" }
                }
                button {
                    class: "button-standard ghost",
                    disabled: disabled,
                    onclick: move |_| {
                        notification.set(None);
                        let provider = wallet.provider.as_ref();
                        let handle = staking::unstake(provider, &unstake_farm, &unstake_token);
                        spawn(async move {
                            let mut updates = handle.subscribe();
                            loop {
                                let state = updates.borrow_and_update().clone();
                                let terminal = state.status.is_terminal();
                                if state.status == TransactionStatus::Success {
                                    notification.set(Some(Notification::Unstaked));
                                    *refresh_balances.write() += 1;
                                }
                                unstake_state.set(state);
                                if terminal || updates.changed().await.is_err() {
                                    break;
                                }
                            }
                        });
                    },
                    "Unstake all"
                }
            }

            if is_mining {
                div { class: "loading-spinner" }
            }

            if let Some(text) = status_text {
                div { class: "stake-status", "{text}" }
            }

            if let Some(error) = input_error() {
                div { class: "error-message", "{error}" }
            }

            if let Some(error) = unstake_state.read().error.clone() {
                div { class: "error-message", "Unstake failed: {error}" }
            }

            {
                match notification() {
                    Some(Notification::Approved) => rsx! {
                        div {
                            class: "success-message",
                            "ERC-20 token transfer approved! Now approve the 2nd transaction."
                        }
                    },
                    Some(Notification::Staked) => rsx! {
                        div { class: "success-message", "Tokens Staked!" }
                    },
                    Some(Notification::Unstaked) => rsx! {
                        div { class: "success-message", "Tokens Unstaked!" }
                    },
                    None => rsx! {},
                }
            }
        }
    }
}
