mod test_direct_relay;
mod test_offer_lifetime;
