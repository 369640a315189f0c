use shared::domain::OrderStatus;
use thiserror::Error;

/// Local validation failures. Synchronous, non-fatal: they block a single
/// operation, leave the draft unchanged and are surfaced to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("aucun produit disponible en stock")]
    NoProductInStock,
    #[error("produit inconnu")]
    UnknownProduct,
    #[error("ligne de commande inconnue (index {0})")]
    LineIndexOutOfRange(usize),
    #[error("la quantité doit être au moins 1")]
    QuantityBelowMinimum,
    #[error("quantité demandée ({requested}) supérieure au stock disponible ({available})")]
    QuantityExceedsStock { requested: u32, available: u32 },
    #[error("passage du statut {from} vers {to} non autorisé")]
    StatusNotAllowed { from: OrderStatus, to: OrderStatus },
    #[error("veuillez sélectionner un client")]
    MissingCustomer,
    #[error("la commande doit contenir au moins une ligne")]
    EmptyOrder,
    #[error("saisie invalide: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Remote failures from the REST backend. Never retried automatically; the
/// draft that triggered the request stays intact so the user can resubmit.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Non-success HTTP status; `message` is the response body verbatim when
    /// present, else a generic fallback.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("échec de la requête: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("encodage du brouillon impossible: {0}")]
    Encode(#[from] serde_json::Error),
}
