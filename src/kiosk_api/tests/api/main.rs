mod gate;
mod helpers;
mod kiosks;
mod login;
mod routes;
