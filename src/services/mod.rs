pub mod pix_service;
