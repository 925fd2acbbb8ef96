//! Client-facing error categories and messages.

// Categories (`ErrorBody::error`)
pub const VALIDATION_FAILED: &str = "Erro de validação nos campos";
pub const BAD_REQUEST: &str = "Requisição inválida";
pub const NOT_FOUND: &str = "Recurso não encontrado";
pub const NOT_ACCEPTABLE: &str = "Tipo de mídia não aceitável";
pub const UNSUPPORTED_MEDIA_TYPE: &str = "Tipo de mídia não suportado";
pub const METHOD_NOT_ALLOWED: &str = "Método não permitido";
pub const PAYLOAD_TOO_LARGE: &str = "Corpo da requisição muito grande";
pub const INTERNAL_ERROR: &str = "Erro interno do servidor";

// Messages (`ErrorBody::message`)
pub const INVALID_FIELDS: &str = "Um ou mais campos estão inválidos";
pub const ROUTE_NOT_FOUND: &str = "O recurso solicitado não existe";
pub const METHOD_NOT_SUPPORTED: &str = "O método HTTP não é suportado por este recurso";
pub const BODY_TOO_LARGE: &str = "O corpo da requisição excede o tamanho máximo permitido";
pub const UNEXPECTED_ERROR: &str = "Ocorreu um erro inesperado";
