pub mod url_request;
