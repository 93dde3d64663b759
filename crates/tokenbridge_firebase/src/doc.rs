// #![cfg(feature = "openapi")] // not needed as we do this in lib.rs already!
use utoipa::OpenApi;

use crate::handlers::{ImportTokensRequest, ImportTokensResponse};
use crate::models::TokenMapping;

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::import_tokens_handler),
    components(schemas(ImportTokensRequest, ImportTokensResponse, TokenMapping)),
    tags(
        (name = "Firebase", description = "APNs to Firebase registration token import")
    )
)]
pub struct FirebaseApiDoc;
