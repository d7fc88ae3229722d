pub mod airtable_gateway;
