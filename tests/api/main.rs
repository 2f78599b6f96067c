mod create_contact;
mod download;
mod health_check;
