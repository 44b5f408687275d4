pub mod result_server;
