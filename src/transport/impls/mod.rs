pub mod reqwest_json_transport;
