pub mod composer;
pub mod entity_form;
pub mod error;
pub mod gateway;

pub use composer::{LineItem, OrderComposer};
pub use entity_form::{EntityForm, FieldRule};
pub use error::{ClientError, FormError, GatewayError};
pub use gateway::{
    CredentialProvider, EntityGateway, HttpGateway, OrderGateway, StaticCredential,
};
