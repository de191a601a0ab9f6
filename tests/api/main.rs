mod dashboard;
mod fee_client;
mod stream;
