use crate::domain::{Error, Flavor};

/// Workflow operations a transport can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A consumer takes a can out and pays for it.
    TakeCan(Flavor),
    /// A consumer puts a can back and gets the flat refund.
    ReturnCan(Flavor),
    /// The subscriber posts the restock bond into escrow.
    AgreeToRestock,
    /// The subscriber restocks, gets the bond back plus the per-can bounty.
    CompleteRestock,
    /// The owner restocks directly. No money moves.
    Restock,
}

impl Command {
    /// Builds a command from an action name and its argument, e.g. the two
    /// path segments of `PUT /statusupdate/dragFromFridge/red_can`.
    pub fn parse(action: &str, argument: Option<&str>) -> Result<Self, Error> {
        let flavor = || -> Result<Flavor, Error> {
            match argument.map(str::trim).filter(|a| !a.is_empty()) {
                Some(a) => a.parse(),
                None => Err(Error::InvalidFlavor(format!("missing flavor for {}", action))),
            }
        };

        match action.trim().to_ascii_lowercase().as_str() {
            "take_can" | "dragfromfridge" => Ok(Command::TakeCan(flavor()?)),
            "return_can" | "dropinfridge" => Ok(Command::ReturnCan(flavor()?)),
            "agree_to_restock" | "agreetorestock" => Ok(Command::AgreeToRestock),
            "complete_restock" | "restockfridge" => Ok(Command::CompleteRestock),
            "restock" => Ok(Command::Restock),
            other => Err(Error::UnknownCommand(other.to_string())),
        }
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Command::TakeCan(flavor) => write!(f, "take_can,{}", flavor),
            Command::ReturnCan(flavor) => write!(f, "return_can,{}", flavor),
            Command::AgreeToRestock => f.write_str("agree_to_restock"),
            Command::CompleteRestock => f.write_str("complete_restock"),
            Command::Restock => f.write_str("restock"),
        }
    }
}
