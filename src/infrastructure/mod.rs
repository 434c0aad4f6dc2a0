pub mod google;
pub mod http;
pub mod openai;
pub mod plaid;
pub mod storage;
