mod test_join_notifies_existing_members;
mod test_join_without_room_is_ignored;
