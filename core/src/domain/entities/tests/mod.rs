mod callback_tests;
mod otp_record_tests;
