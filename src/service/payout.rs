use crate::providers::Bank;
use crate::providers::Chat;
use crate::providers::Transaction;

/// Moves the stake from loser to winner within the team's Briq
/// organization. Briq addresses users by display name, not id.
pub async fn transfer(
    chat: &dyn Chat,
    bank: &dyn Bank,
    amount: u32,
    loser: &str,
    winner: &str,
) -> anyhow::Result<()> {
    let team = chat.team().await?;
    let transaction = Transaction {
        amount,
        comment: "You win bro!! ✊✋✌️".to_string(),
        app: "shifubriq".to_string(),
        from: loser.to_string(),
        to: winner.to_string(),
    };
    bank.transfer(&transaction, &team.name).await
}
